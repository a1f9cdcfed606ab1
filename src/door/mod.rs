//! A single calendar door: configuration model, lifecycle state machine, geometry, and the
//! per-frame render intent.

pub(crate) mod geometry;
pub(crate) mod intent;
pub(crate) mod machine;
pub(crate) mod model;
