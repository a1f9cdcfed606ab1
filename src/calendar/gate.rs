use crate::door::model::DoorId;

/// Which doors may be opened, given overrides from the calendar config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AccessPolicy {
    /// Unlock everything regardless of date.
    pub all_doors: bool,
    /// Pretend today is this day (already clamped to `1..=31`).
    pub test_day: Option<u8>,
}

impl AccessPolicy {
    pub fn new(all_doors: bool, test_day: Option<i64>) -> Self {
        Self {
            all_doors,
            test_day: test_day.map(clamp_day),
        }
    }

    /// The day doors are compared against: 31 with `all_doors`, else the test day, else
    /// `today` (day of month from the clock).
    pub fn resolve_day(&self, today: u32) -> u8 {
        if self.all_doors {
            return DoorId::MAX;
        }
        match self.test_day {
            Some(day) => day,
            None => clamp_day(i64::from(today)),
        }
    }

    /// A door unlocks once the resolved day reaches its id.
    pub fn permits(&self, door: DoorId, today: u32) -> bool {
        self.all_doors || door.get() <= self.resolve_day(today)
    }
}

pub fn clamp_day(day: i64) -> u8 {
    day.clamp(i64::from(DoorId::MIN), i64::from(DoorId::MAX)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/gate.rs"]
mod tests;
