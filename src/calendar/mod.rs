//! The calendar as a whole: access gating, config loading, clocks, media collaborators, and the
//! application context that drives every door.

pub(crate) mod clock;
pub(crate) mod config;
pub(crate) mod cues;
pub(crate) mod gate;
pub(crate) mod session;
