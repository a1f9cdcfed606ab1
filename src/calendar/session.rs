use std::path::Path;

use kurbo::Point;

use crate::assets::toys::ToyCatalog;
use crate::calendar::clock::Clock;
use crate::calendar::config::CalendarConfig;
use crate::calendar::cues::{SoundCue, VideoOverlay};
use crate::calendar::gate::AccessPolicy;
use crate::door::intent::DoorIntent;
use crate::door::machine::{Door, DoorState};
use crate::door::model::DoorId;
use crate::foundation::core::{Canvas, Millis, Tick};

/// Sound and video collaborators owned by a [`Calendar`].
#[derive(Clone, Debug, Default)]
pub struct CalendarMedia<S, V> {
    pub open_sound: Option<S>,
    pub locked_sound: Option<S>,
    pub overlay: V,
}

/// The video currently shown by the overlay.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ActiveVideo {
    pub door: DoorId,
    pub path: String,
}

/// Result of one pointer press.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PressOutcome {
    /// No closed door under the pointer.
    Missed,
    /// A closed door was hit but its day has not come yet.
    Locked { door: DoorId },
    /// A door started opening; `video` is set for video doors.
    Opened { door: DoorId, video: Option<String> },
}

/// Application context: every door plus the shared state they are driven with.
///
/// The host calls [`Calendar::tick`] once per frame, reads [`Calendar::intents`] to draw, and
/// forwards pointer presses and video completion.
#[derive(Debug)]
pub struct Calendar<S, V> {
    doors: Vec<Door>,
    canvas: Canvas,
    access: AccessPolicy,
    media: CalendarMedia<S, V>,
    active_video: Option<ActiveVideo>,
}

impl<S, V> Calendar<S, V>
where
    S: SoundCue,
    V: VideoOverlay,
{
    /// Build doors from `config`. Ids are unique: a later door reusing an id is skipped so that
    /// press outcomes and video finish signals always name exactly one door.
    pub fn new(config: &CalendarConfig, canvas: Canvas, media: CalendarMedia<S, V>) -> Self {
        let mut doors: Vec<Door> = Vec::with_capacity(config.doors.len());
        for cfg in &config.doors {
            match Door::from_config(cfg) {
                Ok(door) if doors.iter().any(|d| d.id() == door.id()) => {
                    tracing::warn!(id = cfg.id, "skipping door with duplicate id");
                }
                Ok(door) => doors.push(door),
                Err(err) => tracing::warn!(id = cfg.id, error = %err, "skipping door"),
            }
        }
        tracing::info!(doors = doors.len(), access = ?config.access, "calendar ready");

        Self {
            doors,
            canvas,
            access: config.access,
            media,
            active_video: None,
        }
    }

    /// Load calendar JSON from `path`; an unreadable or malformed file leaves the calendar
    /// without doors.
    pub fn load_or_empty(path: &Path, canvas: Canvas, media: CalendarMedia<S, V>) -> Self {
        let config = CalendarConfig::from_path(path).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "calendar config unavailable; running without doors");
            CalendarConfig::default()
        });
        Self::new(&config, canvas, media)
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.iter().find(|d| d.id() == id)
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn access(&self) -> AccessPolicy {
        self.access
    }

    pub fn media(&self) -> &CalendarMedia<S, V> {
        &self.media
    }

    pub fn active_video(&self) -> Option<&ActiveVideo> {
        self.active_video.as_ref()
    }

    pub fn resize(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    /// Hit-test closed doors in order and act on the first one under `p`.
    ///
    /// At most one door changes state per press.
    #[tracing::instrument(skip(self, clock))]
    pub fn press(&mut self, p: Point, clock: &dyn Clock) -> PressOutcome {
        let canvas = self.canvas;
        let Some(door) = self
            .doors
            .iter_mut()
            .find(|d| d.state() == DoorState::Closed && d.is_hit(p, canvas))
        else {
            return PressOutcome::Missed;
        };
        let id = door.id();

        if !self.access.permits(id, clock.day_of_month()) {
            door.trigger_locked(
                self.media
                    .locked_sound
                    .as_mut()
                    .map(|s| s as &mut dyn SoundCue),
            );
            return PressOutcome::Locked { door: id };
        }

        let video = door.open(self.media.open_sound.as_mut().map(|s| s as &mut dyn SoundCue));
        if let Some(path) = video.as_deref().filter(|s| !s.is_empty()) {
            self.present_video(id, path);
        }
        PressOutcome::Opened { door: id, video }
    }

    /// Advance every door by one default-step frame.
    pub fn tick(&mut self, now: Millis) {
        self.tick_with(Tick::at(now));
    }

    pub fn tick_with(&mut self, tick: Tick) {
        for door in &mut self.doors {
            door.update(tick);
        }
    }

    /// Render intents for all doors in configuration order.
    pub fn intents(&self, toys: &dyn ToyCatalog) -> Vec<DoorIntent> {
        self.doors
            .iter()
            .map(|d| d.intent(self.canvas, toys))
            .collect()
    }

    /// The overlay finished (or was dismissed) playing the video for `door`.
    pub fn video_finished(&mut self, door: DoorId) {
        if self.active_video.as_ref().is_some_and(|v| v.door == door) {
            self.active_video = None;
            self.media.overlay.dismiss();
        }
        if let Some(d) = self.doors.iter_mut().find(|d| d.id() == door) {
            tracing::info!(door = %door, "video finished");
            d.handle_video_finished();
        }
    }

    fn present_video(&mut self, door: DoorId, path: &str) {
        if let Some(previous) = self.active_video.take() {
            tracing::debug!(door = %previous.door, "replacing active video");
            self.media.overlay.dismiss();
        }
        tracing::info!(door = %door, path, "presenting video");
        self.media.overlay.present(door, path);
        self.active_video = Some(ActiveVideo {
            door,
            path: path.to_string(),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/session.rs"]
mod tests;
