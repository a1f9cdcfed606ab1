//! Collaborator seams for sound and video playback.
//!
//! The engine never plays media itself. Hosts plug in implementations; the recording types here
//! back headless drivers (the CLI) and tests.

use crate::door::model::DoorId;

/// A short sound effect that is restarted from the beginning on every play.
pub trait SoundCue {
    /// Move the playhead back to the start.
    fn rewind(&mut self);
    /// Start playback from the current playhead.
    fn play(&mut self);
}

/// Host surface that shows door videos on top of the calendar.
///
/// When playback of a presented video ends (or the user dismisses it) the host reports it
/// through [`crate::Calendar::video_finished`].
pub trait VideoOverlay {
    fn present(&mut self, door: DoorId, path: &str);
    fn dismiss(&mut self);
}

/// Sound cue that only counts calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingCue {
    pub rewinds: u32,
    pub plays: u32,
}

impl RecordingCue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SoundCue for RecordingCue {
    fn rewind(&mut self) {
        self.rewinds += 1;
    }

    fn play(&mut self) {
        self.plays += 1;
    }
}

/// Overlay that remembers what it was asked to show.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingOverlay {
    pub active: Option<(DoorId, String)>,
    pub presented: Vec<(DoorId, String)>,
    pub dismissals: u32,
}

impl VideoOverlay for RecordingOverlay {
    fn present(&mut self, door: DoorId, path: &str) {
        self.active = Some((door, path.to_string()));
        self.presented.push((door, path.to_string()));
    }

    fn dismiss(&mut self) {
        if self.active.take().is_some() {
            self.dismissals += 1;
        }
    }
}
