//! Domain types for the clock widget.

use chrono::NaiveTime;
use thiserror::Error;

/// Maximum number of alarms the widget holds.
pub const MAX_ALARMS: usize = 3;

/// Battery level the widget starts with.
pub const FULL_BATTERY: u8 = 100;

/// A configured alarm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alarm {
    /// Unique identifier.
    pub id: i64,
    /// Time of day the alarm fires, to the second.
    pub time: NaiveTime,
    /// Disabled alarms keep their slot but stay silent.
    pub enabled: bool,
}

impl Alarm {
    /// `HH:MM:SS` label for list rendering.
    #[must_use]
    pub fn label(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}

/// Errors raised when adding an alarm.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// Hour, minute, or second was out of range.
    #[error("alarm time fields are out of range")]
    InvalidTime,

    /// The alarm list is full.
    #[error("at most {MAX_ALARMS} alarms can be added")]
    TooManyAlarms,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alarm_label_is_zero_padded() {
        let alarm = Alarm {
            id: 1,
            time: NaiveTime::from_hms_opt(7, 5, 0).unwrap_or_default(),
            enabled: true,
        };
        assert_eq!(alarm.label(), "07:05:00");
    }
}
