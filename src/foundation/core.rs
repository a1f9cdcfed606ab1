use crate::foundation::error::{AdventError, AdventResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Pixel size of the drawing surface.
///
/// Door geometry is stored normalized; this is the only place pixel scale comes from, and it
/// may change at any time (window resize).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> AdventResult<Self> {
        if width == 0 || height == 0 {
            return Err(AdventError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

/// Wall-clock timestamp in milliseconds.
///
/// Only differences between two values are meaningful; the origin is whatever the driving
/// [`crate::Clock`] chooses.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Milliseconds elapsed since `earlier`, saturating at zero if the clock went backwards.
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn plus(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

/// Animation progress added per rendered frame.
///
/// Frame-coupled: a door opens over a fixed number of frames, not a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameStep(pub f64);

impl FrameStep {
    /// One second of animation at an assumed 30fps.
    pub const DEFAULT: Self = Self(1.0 / 30.0);
}

impl Default for FrameStep {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Inputs for one frame of door updates: the frame-domain step and the wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub step: FrameStep,
    pub now: Millis,
}

impl Tick {
    /// A frame using the default step.
    pub fn at(now: Millis) -> Self {
        Self {
            step: FrameStep::DEFAULT,
            now,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
