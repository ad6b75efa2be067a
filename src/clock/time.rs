use std::fmt;

use rand::Rng;

/// The twelve minute marks a question can land on.
pub const MINUTE_STEPS: [u8; 12] = [0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55];

/// A time on the dial. Targets and pad answers keep `minute` on
/// [`MINUTE_STEPS`]; a dragged minute hand can rest on any of 0..=59.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    /// Both hands on the 12, where interactive dials start.
    pub const fn noon() -> Self {
        Self {
            hour: 12,
            minute: 0,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let hour = rng.gen_range(1..=12);
        let minute = MINUTE_STEPS[rng.gen_range(0..MINUTE_STEPS.len())];
        Self { hour, minute }
    }

    /// Hour as shown on a twelve-hour dial (0 and 12 both read as 12).
    pub fn dial_hour(self) -> u8 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }

    /// Whether `self` reads the same as `target` on the dial.
    ///
    /// Only 0 and 12 are folded together; any other hour must match exactly.
    pub fn matches(self, target: ClockTime) -> bool {
        let hour_match = self.hour == target.hour
            || (self.hour == 12 && target.hour == 0)
            || (self.hour == 0 && target.hour == 12);
        hour_match && self.minute == target.minute
    }

    pub fn with_hour(self, hour: u8) -> Self {
        Self { hour, ..self }
    }

    pub fn with_minute(self, minute: u8) -> Self {
        Self { minute, ..self }
    }

    /// Move the hour hand by whole hours, wrapping within 1..=12.
    pub fn step_hour(self, delta: i32) -> Self {
        let current = self.dial_hour() as i32 - 1;
        let next = (current + delta).rem_euclid(12) + 1;
        self.with_hour(next as u8)
    }

    /// Move the minute hand by five-minute steps, snapping to the step grid.
    pub fn step_minute(self, delta: i32) -> Self {
        let current = (self.minute / 5) as i32;
        let next = (current + delta).rem_euclid(12) * 5;
        self.with_minute(next as u8)
    }
}

impl Default for ClockTime {
    fn default() -> Self {
        Self::noon()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}時{}分", self.hour, self.minute)
    }
}
