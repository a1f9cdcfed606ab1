use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{AdventError, AdventResult};
use crate::foundation::math::mul_div255;

/// Lookup from a door's toy key to a loaded image.
///
/// The engine only needs to know whether a toy can be drawn; a missing key silently skips the
/// toy for that frame.
pub trait ToyCatalog {
    fn has_toy(&self, key: &str) -> bool;
}

impl ToyCatalog for BTreeSet<String> {
    fn has_toy(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// Catalog that claims every key. Used by headless drivers that never draw pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyToy;

impl ToyCatalog for AnyToy {
    fn has_toy(&self, _key: &str) -> bool {
        true
    }
}

#[derive(Clone, Debug)]
pub struct ToyImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decoded toy images keyed by payload name.
#[derive(Clone, Debug, Default)]
pub struct ToyLibrary {
    toys: BTreeMap<String, ToyImage>,
}

impl ToyLibrary {
    /// File-name prefix stripped when deriving keys (`toy_star.png` -> `star`).
    pub const FILE_PREFIX: &'static str = "toy_";

    pub fn new() -> Self {
        Self::default()
    }

    /// Load every PNG in `dir`. Files that fail to decode are skipped with a warning.
    #[tracing::instrument]
    pub fn load_dir(dir: &Path) -> AdventResult<Self> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| AdventError::asset(format!("read toy dir '{}': {e}", dir.display())))?;

        let mut lib = Self::new();
        for entry in entries {
            let path = entry.context("list toy dir")?.path();
            let is_png = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"));
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_png {
                continue;
            }
            let key = stem.strip_prefix(Self::FILE_PREFIX).unwrap_or(stem).to_string();

            let bytes = std::fs::read(&path)
                .with_context(|| format!("read toy image '{}'", path.display()))?;
            if let Err(err) = lib.insert_bytes(key.clone(), &bytes) {
                tracing::warn!(toy = %key, error = %err, "skipping undecodable toy image");
            }
        }
        tracing::info!(count = lib.len(), "toy images loaded");
        Ok(lib)
    }

    pub fn insert_bytes(&mut self, key: impl Into<String>, bytes: &[u8]) -> AdventResult<()> {
        let image = decode_toy(bytes)?;
        self.toys.insert(key.into(), image);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ToyImage> {
        self.toys.get(key)
    }

    pub fn len(&self) -> usize {
        self.toys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toys.is_empty()
    }
}

impl ToyCatalog for ToyLibrary {
    fn has_toy(&self, key: &str) -> bool {
        self.toys.contains_key(key)
    }
}

pub fn decode_toy(bytes: &[u8]) -> AdventResult<ToyImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| AdventError::asset(format!("decode toy image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_in_place(&mut rgba8_premul);

    Ok(ToyImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = mul_div255(u16::from(*c), a);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/toys.rs"]
mod tests;
