use crate::foundation::error::{AdventError, AdventResult};

/// Calendar day a door belongs to, always in `1..=31`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct DoorId(u8);

impl DoorId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 31;

    pub fn new(day: i64) -> AdventResult<Self> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&day) {
            return Err(AdventError::validation(format!(
                "door id must be in {}..={}, got {day}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(day as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for DoorId {
    type Error = AdventError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DoorId> for u8 {
    fn from(id: DoorId) -> Self {
        id.0
    }
}

impl std::fmt::Display for DoorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a door reveals once open.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// Key of a preloaded toy image.
    Image(String),
    /// Path of a video presented by an external overlay.
    Video(String),
}

impl Payload {
    pub const VIDEO_PREFIX: &'static str = "mp4:";

    /// Decide the payload kind from its configured string form (`"star"`, `"mp4:clip.mp4"`).
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(Self::VIDEO_PREFIX) {
            Some(path) => Self::Video(path.to_string()),
            None => Self::Image(raw.to_string()),
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video(_))
    }

    pub fn toy_key(&self) -> Option<&str> {
        match self {
            Self::Image(key) => Some(key),
            Self::Video(_) => None,
        }
    }

    pub fn video_path(&self) -> Option<&str> {
        match self {
            Self::Image(_) => None,
            Self::Video(path) => Some(path),
        }
    }
}

/// How a door panel moves out of the way while opening.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStyle {
    /// Panel translates right by its own width.
    #[default]
    Slide,
    /// Panel swings up to 90 degrees around its top-left corner.
    Hinge,
    /// Panel collapses horizontally toward its left edge.
    Fold,
    /// Panel drops three heights while spinning half a turn.
    Fall,
    /// Two leaves slide apart from the center.
    Double,
}

impl AnimationStyle {
    pub const ALL: [Self; 5] = [
        Self::Slide,
        Self::Hinge,
        Self::Fold,
        Self::Fall,
        Self::Double,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Slide => "slide",
            Self::Hinge => "hinge",
            Self::Fold => "fold",
            Self::Fall => "fall",
            Self::Double => "double",
        }
    }

    /// Map a configured name onto a style; anything unrecognized is [`AnimationStyle::Slide`].
    pub fn from_name(name: Option<&str>) -> Self {
        name.and_then(|n| Self::ALL.into_iter().find(|s| s.name() == n))
            .unwrap_or_default()
    }
}

/// One door as it appears in calendar JSON.
///
/// Geometry is in fractions of the canvas, each in `[0, 1]`. `id` accepts integral floats
/// such as `1.0`. `animation` is kept as raw JSON so that a non-string value degrades to the
/// default style instead of rejecting the door.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DoorConfig {
    #[serde(deserialize_with = "deserialize_integral")]
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<serde_json::Value>,
}

impl DoorConfig {
    pub fn validate(&self) -> AdventResult<()> {
        DoorId::new(self.id)?;
        for (name, v) in [("x", self.x), ("y", self.y), ("w", self.w), ("h", self.h)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(AdventError::validation(format!(
                    "door {}: {name} must be a canvas fraction in [0, 1], got {v}",
                    self.id
                )));
            }
        }
        Ok(())
    }

    pub fn animation_style(&self) -> AnimationStyle {
        AnimationStyle::from_name(self.animation.as_ref().and_then(|v| v.as_str()))
    }
}

/// Integral JSON numbers only; `5.0` counts, `5.5` and `"5"` do not.
pub(crate) fn json_integer(v: &serde_json::Value) -> Option<i64> {
    let serde_json::Value::Number(n) = v else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}

fn deserialize_integral<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = <serde_json::Value as serde::Deserialize>::deserialize(d)?;
    json_integer(&v)
        .ok_or_else(|| serde::de::Error::custom(format!("door id must be an integer, got {v}")))
}

#[cfg(test)]
#[path = "../../tests/unit/door/model.rs"]
mod tests;
