//! Advent is the engine behind an interactive advent calendar: a background image overlaid with
//! clickable doors that open, reveal a toy or a video, and close again.
//!
//! # Model overview
//!
//! 1. **Configure**: calendar JSON -> [`CalendarConfig`] (door records + access overrides)
//! 2. **Drive**: a host owns a [`Calendar`], calls [`Calendar::tick`] once per frame and
//!    forwards pointer presses to [`Calendar::press`]
//! 3. **Draw**: [`Calendar::intents`] returns one [`DoorIntent`] per door; a renderer (or the
//!    bundled [`render_preview`]) turns them into pixels
//!
//! Each [`Door`] cycles `closed -> opening -> open -> closing -> closed`. Panel motion is
//! frame-driven (a fixed step per tick) while the toy hold and fade run on wall-clock
//! [`Millis`]; both arrive through [`Tick`].
//!
//! Which doors may open is decided by [`AccessPolicy`]: a door unlocks once the resolved day
//! reaches its id, with `ALL_DOORS` and `testDay` overrides from the config.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod calendar;
mod door;
mod foundation;
mod render;

pub use animation::ease::Ease;
pub use assets::toys::{AnyToy, ToyCatalog, ToyImage, ToyLibrary, decode_toy};
pub use calendar::clock::{Clock, ManualClock, SystemClock};
pub use calendar::config::CalendarConfig;
pub use calendar::cues::{RecordingCue, RecordingOverlay, SoundCue, VideoOverlay};
pub use calendar::gate::{AccessPolicy, clamp_day};
pub use calendar::session::{ActiveVideo, Calendar, CalendarMedia, PressOutcome};
pub use door::geometry::{
    DOUBLE_GAP_FRACTION, DOUBLE_LEAF_MARGIN_PX, DOUBLE_MIN_GAP_PX, NormalizedRect, PanelLeaf,
    double_leaf_split, panel_leaves,
};
pub use door::intent::{DoorIntent, ToyIntent};
pub use door::machine::{Door, DoorState, TOY_FADE_MS, TOY_HOLD_MS};
pub use door::model::{AnimationStyle, DoorConfig, DoorId, Payload};
pub use foundation::core::{Affine, Canvas, FrameStep, Millis, Point, Rect, Tick, Vec2};
pub use foundation::error::{AdventError, AdventResult};
pub use render::preview::{PremulRgba8, PreviewFrame, PreviewPalette, over, render_preview};
