use std::time::Instant;

use chrono::Datelike;

use crate::foundation::core::Millis;

/// Source of wall-clock time and the calendar date.
pub trait Clock {
    /// Monotonic milliseconds used for reveal hold/fade timing.
    fn now(&self) -> Millis;
    /// Day of the month (1..=31) in local time.
    fn day_of_month(&self) -> u32;
}

/// Real time: a monotonic timer started at construction plus the local date.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        Millis(u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX))
    }

    fn day_of_month(&self) -> u32 {
        chrono::Local::now().day()
    }
}

/// Clock that only moves when told to. Drives simulations and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManualClock {
    pub now: Millis,
    pub day: u32,
}

impl ManualClock {
    pub fn new(day: u32) -> Self {
        Self {
            now: Millis(0),
            day,
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now = self.now.plus(ms);
    }

    pub fn set(&mut self, now: Millis) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now
    }

    fn day_of_month(&self) -> u32 {
        self.day
    }
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/clock.rs"]
mod tests;
