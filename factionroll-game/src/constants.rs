//! Centralized tuning constants for faction rolls and protection scheduling.
//!
//! These values define the default behavior of every helper in the crate.
//! `RollConfig` can override the sleep window and chance at runtime; the
//! protection thresholds are fixed.

// Sleep window ---------------------------------------------------------------
pub const SLEEP_WINDOW_START_HOUR: u32 = 22;
pub const SLEEP_WINDOW_END_HOUR: u32 = 6;
pub const SLEEP_ROLL_CHANCE: f64 = 0.5;

// Protection scheduling -------------------------------------------------------
pub const PROTECTION_NOON_HOUR: u32 = 12;
pub const ASSUMED_ABSTINENCE_HOURS: i64 = 3;
pub const ASSUMED_ABSTINENCE_MS: i64 = ASSUMED_ABSTINENCE_HOURS * 60 * 60 * 1000;

/// Calendar-day layout used for welcome markers, e.g. `Wed Jan 03 2024`.
pub const WELCOME_DATE_FORMAT: &str = "%a %b %d %Y";

pub(crate) const HOURS_PER_DAY: u32 = 24;
