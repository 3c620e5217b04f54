//! Nighttime window during which the sleep faction may be rolled.
use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::constants::{HOURS_PER_DAY, SLEEP_WINDOW_END_HOUR, SLEEP_WINDOW_START_HOUR};

/// Hour range `[start_hour, end_hour)` in local time.
///
/// A start after the end wraps past midnight. Equal hours describe an empty
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepWindow {
    #[serde(default = "SleepWindow::default_start_hour")]
    pub start_hour: u32,
    #[serde(default = "SleepWindow::default_end_hour")]
    pub end_hour: u32,
}

impl SleepWindow {
    /// The 22:00 to 06:00 window.
    pub const NIGHT: Self = Self::new(SLEEP_WINDOW_START_HOUR, SLEEP_WINDOW_END_HOUR);

    #[must_use]
    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    const fn default_start_hour() -> u32 {
        SLEEP_WINDOW_START_HOUR
    }

    const fn default_end_hour() -> u32 {
        SLEEP_WINDOW_END_HOUR
    }

    #[must_use]
    pub const fn wraps_midnight(self) -> bool {
        self.start_hour > self.end_hour
    }

    #[must_use]
    pub const fn contains_hour(self, hour: u32) -> bool {
        let hour = hour % HOURS_PER_DAY;
        if self.start_hour == self.end_hour {
            false
        } else if self.wraps_midnight() {
            hour >= self.start_hour || hour < self.end_hour
        } else {
            hour >= self.start_hour && hour < self.end_hour
        }
    }

    /// Only the hour of `date` matters; minutes and seconds never move the edge.
    #[must_use]
    pub fn contains<D: Timelike>(&self, date: &D) -> bool {
        self.contains_hour(date.hour())
    }
}

impl Default for SleepWindow {
    fn default() -> Self {
        Self::NIGHT
    }
}

/// True when `date` falls in the 22:00 to 06:00 local window.
///
/// The caller decides what "local" means by the type it passes: a
/// `DateTime<Local>`, a `DateTime<FixedOffset>`, or a naive wall-clock time.
#[must_use]
pub fn is_sleep_window<D: Timelike>(date: &D) -> bool {
    SleepWindow::NIGHT.contains(date)
}
