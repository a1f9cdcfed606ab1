use kurbo::{Point, Rect};

use crate::calendar::cues::SoundCue;
use crate::door::geometry::NormalizedRect;
use crate::door::model::{AnimationStyle, DoorConfig, DoorId, Payload};
use crate::foundation::core::{Canvas, Millis, Tick};
use crate::foundation::error::AdventResult;
use crate::foundation::math::{PROGRESS_EPSILON, clamp01, rect_contains_inclusive};

/// How long a revealed toy stays fully visible before it starts fading.
pub const TOY_HOLD_MS: u64 = 10_000;
/// Duration of the toy fade-out; the door closes when it completes.
pub const TOY_FADE_MS: u64 = 2_000;

/// Lifecycle position of a door. Always advances in declaration order, wrapping back to
/// `Closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorState {
    Closed,
    Opening,
    Open,
    Closing,
}

impl DoorState {
    fn next(self) -> Self {
        match self {
            Self::Closed => Self::Opening,
            Self::Opening => Self::Open,
            Self::Open => Self::Closing,
            Self::Closing => Self::Closed,
        }
    }
}

/// One calendar door and its animation timers.
///
/// Geometry, payload and style are fixed at construction. Everything else is driven by
/// [`Door::open`], [`Door::update`] and [`Door::handle_video_finished`].
#[derive(Clone, Debug)]
pub struct Door {
    id: DoorId,
    bounds: NormalizedRect,
    payload: Payload,
    style: AnimationStyle,

    state: DoorState,
    anim_progress: f64,
    toy_progress: f64,
    toy_alpha: f64,
    opened_at: Option<Millis>,
    fade_started_at: Option<Millis>,
    // Video finished before the door was fully open.
    close_requested: bool,
}

impl Door {
    pub fn new(id: DoorId, bounds: NormalizedRect, payload: Payload, style: AnimationStyle) -> Self {
        Self {
            id,
            bounds,
            payload,
            style,
            state: DoorState::Closed,
            anim_progress: 0.0,
            toy_progress: 0.0,
            toy_alpha: 1.0,
            opened_at: None,
            fade_started_at: None,
            close_requested: false,
        }
    }

    /// Build a door from its JSON record, normalizing the animation style.
    pub fn from_config(cfg: &DoorConfig) -> AdventResult<Self> {
        cfg.validate()?;
        Ok(Self::new(
            DoorId::new(cfg.id)?,
            NormalizedRect {
                x: cfg.x,
                y: cfg.y,
                w: cfg.w,
                h: cfg.h,
            },
            Payload::parse(&cfg.payload),
            cfg.animation_style(),
        ))
    }

    pub fn id(&self) -> DoorId {
        self.id
    }

    pub fn bounds(&self) -> NormalizedRect {
        self.bounds
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn style(&self) -> AnimationStyle {
        self.style
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn anim_progress(&self) -> f64 {
        self.anim_progress
    }

    pub fn toy_progress(&self) -> f64 {
        self.toy_progress
    }

    pub fn toy_alpha(&self) -> f64 {
        self.toy_alpha
    }

    pub fn opened_at(&self) -> Option<Millis> {
        self.opened_at
    }

    pub fn fade_started_at(&self) -> Option<Millis> {
        self.fade_started_at
    }

    pub fn pixel_rect(&self, canvas: Canvas) -> Rect {
        self.bounds.to_pixels(canvas)
    }

    /// Inclusive hit test against the door's current pixel bounds.
    pub fn is_hit(&self, p: Point, canvas: Canvas) -> bool {
        rect_contains_inclusive(self.pixel_rect(canvas), p)
    }

    /// Whether the door unlocks on `resolved_day` (see [`crate::AccessPolicy::resolve_day`]).
    pub fn can_open(&self, resolved_day: u8) -> bool {
        self.id.get() <= resolved_day
    }

    /// Start opening. Returns the video path for video doors.
    ///
    /// Does nothing and returns `None` unless the door is closed.
    pub fn open(&mut self, sound: Option<&mut dyn SoundCue>) -> Option<String> {
        if self.state != DoorState::Closed {
            return None;
        }

        if let Some(sound) = sound {
            sound.rewind();
            sound.play();
        }

        self.transition(DoorState::Opening);
        self.anim_progress = 0.0;
        tracing::info!(door = %self.id, "door opening");

        self.payload.video_path().map(str::to_string)
    }

    /// Play the locked cue for a refused press. Door state is untouched.
    pub fn trigger_locked(&self, sound: Option<&mut dyn SoundCue>) {
        tracing::debug!(door = %self.id, "door locked");
        if let Some(sound) = sound {
            sound.rewind();
            sound.play();
        }
    }

    /// The external video overlay for this door finished or was dismissed.
    pub fn handle_video_finished(&mut self) {
        if !self.payload.is_video() {
            return;
        }
        match self.state {
            DoorState::Closed | DoorState::Closing => {}
            DoorState::Opening => self.close_requested = true,
            DoorState::Open => self.transition(DoorState::Closing),
        }
    }

    /// Advance timers by one frame.
    pub fn update(&mut self, tick: Tick) {
        let step = tick.step.0.max(0.0);
        match self.state {
            DoorState::Closed => {}
            DoorState::Opening => {
                self.anim_progress = clamp01(self.anim_progress + step);
                if self.anim_progress >= 1.0 - PROGRESS_EPSILON {
                    self.anim_progress = 1.0;
                    self.transition(DoorState::Open);
                    if !self.payload.is_video() {
                        self.reset_reveal();
                        self.opened_at = Some(tick.now);
                    }
                }
            }
            DoorState::Open => {
                if self.payload.is_video() {
                    if self.close_requested {
                        self.close_requested = false;
                        self.transition(DoorState::Closing);
                    }
                } else {
                    self.advance_reveal(step, tick.now);
                }
            }
            DoorState::Closing => {
                self.anim_progress = clamp01(self.anim_progress - step);
                if self.anim_progress <= PROGRESS_EPSILON {
                    self.anim_progress = 0.0;
                    self.transition(DoorState::Closed);
                    self.reset_reveal();
                    self.close_requested = false;
                }
            }
        }
    }

    fn advance_reveal(&mut self, step: f64, now: Millis) {
        if self.toy_progress < 1.0 {
            self.toy_progress = clamp01(self.toy_progress + step);
            if self.toy_progress >= 1.0 - PROGRESS_EPSILON {
                self.toy_progress = 1.0;
            }
        }

        let Some(opened_at) = self.opened_at else {
            self.opened_at = Some(now);
            return;
        };

        if self.fade_started_at.is_none() && now.since(opened_at) >= TOY_HOLD_MS {
            tracing::debug!(door = %self.id, "toy fade started");
            self.fade_started_at = Some(now);
        }

        if let Some(fade_started_at) = self.fade_started_at {
            let faded = now.since(fade_started_at) as f64 / TOY_FADE_MS as f64;
            self.toy_alpha = self.toy_alpha.min(1.0 - clamp01(faded));
            if self.toy_alpha <= 0.0 {
                self.toy_alpha = 0.0;
                self.transition(DoorState::Closing);
            }
        }
    }

    fn reset_reveal(&mut self) {
        self.toy_progress = 0.0;
        self.toy_alpha = 1.0;
        self.opened_at = None;
        self.fade_started_at = None;
    }

    fn transition(&mut self, to: DoorState) {
        debug_assert_eq!(self.state.next(), to, "door transitions must not skip states");
        tracing::debug!(door = %self.id, from = ?self.state, to = ?to, "door transition");
        self.state = to;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/door/machine.rs"]
mod tests;
