use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use crate::calendar::gate::AccessPolicy;
use crate::door::model::{DoorConfig, json_integer};
use crate::foundation::error::{AdventError, AdventResult};

/// Calendar JSON after lenient normalization.
///
/// ```json
/// { "ALL_DOORS": false, "testDay": 5, "doors": [ { "id": 1, "x": 0.1, ... } ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalendarConfig {
    pub access: AccessPolicy,
    pub doors: Vec<DoorConfig>,
}

#[derive(serde::Deserialize)]
struct RawCalendarConfig {
    #[serde(rename = "ALL_DOORS", default)]
    all_doors: Value,
    #[serde(rename = "testDay", default)]
    test_day: Value,
    #[serde(default)]
    doors: Value,
}

impl CalendarConfig {
    /// Parse calendar JSON.
    ///
    /// Fails only when the document is not a JSON object. A `doors` value that is not an
    /// array yields no doors; door entries that do not validate are skipped.
    pub fn from_json_str(s: &str) -> AdventResult<Self> {
        let v: Value = serde_json::from_str(s)
            .map_err(|e| AdventError::config(format!("parse calendar JSON: {e}")))?;
        Self::from_value(v)
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> AdventResult<Self> {
        let v: Value = serde_json::from_reader(r)
            .map_err(|e| AdventError::config(format!("parse calendar JSON: {e}")))?;
        Self::from_value(v)
    }

    pub fn from_value(v: Value) -> AdventResult<Self> {
        if !v.is_object() {
            return Err(AdventError::config(format!(
                "calendar JSON must be an object, found {}",
                json_kind(&v)
            )));
        }
        let raw: RawCalendarConfig = serde_json::from_value(v)
            .map_err(|e| AdventError::config(format!("parse calendar JSON: {e}")))?;
        Ok(Self::from_raw(raw))
    }

    #[tracing::instrument]
    pub fn from_path(path: &Path) -> AdventResult<Self> {
        let f = File::open(path).map_err(|e| {
            AdventError::config(format!("open calendar JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    fn from_raw(raw: RawCalendarConfig) -> Self {
        let access = AccessPolicy::new(js_truthy(&raw.all_doors), json_integer(&raw.test_day));

        let doors = match raw.doors {
            Value::Array(entries) => {
                let mut seen = BTreeSet::new();
                entries
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, entry)| parse_door(index, entry))
                    .filter(|(index, cfg)| {
                        let fresh = seen.insert(cfg.id);
                        if !fresh {
                            tracing::warn!(index = *index, id = cfg.id, "skipping door with duplicate id");
                        }
                        fresh
                    })
                    .map(|(_, cfg)| cfg)
                    .collect()
            }
            other => {
                tracing::warn!(found = %json_kind(&other), "calendar `doors` is not an array; no doors loaded");
                Vec::new()
            }
        };

        Self { access, doors }
    }
}

fn parse_door(index: usize, entry: Value) -> Option<(usize, DoorConfig)> {
    let parsed = serde_json::from_value::<DoorConfig>(entry)
        .map_err(|e| AdventError::serde(e.to_string()))
        .and_then(|cfg| cfg.validate().map(|()| cfg));
    match parsed {
        Ok(cfg) => Some((index, cfg)),
        Err(err) => {
            tracing::warn!(index, error = %err, "skipping invalid door entry");
            None
        }
    }
}

/// JavaScript truthiness of a JSON value.
fn js_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/config.rs"]
mod tests;
