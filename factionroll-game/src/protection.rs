//! Protection scheduling: effective last-play time and welcome deferral.
use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Timelike};
use log::debug;

use crate::constants::{ASSUMED_ABSTINENCE_HOURS, PROTECTION_NOON_HOUR, WELCOME_DATE_FORMAT};

/// Normalize the last recorded session into the instant abstinence is
/// measured from.
///
/// Before noon (in `now`'s zone) `last_game_at` passes through untouched,
/// `None` included. From noon on, a missing session or one recorded on an
/// earlier calendar day is replaced by `now - 3h`, treating the abstinence
/// window as already satisfied. Same-day sessions pass through.
#[must_use]
pub fn compute_effective_last_game_at<Tz: TimeZone>(
    last_game_at: Option<DateTime<Tz>>,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    if now.hour() < PROTECTION_NOON_HOUR {
        return last_game_at;
    }

    let today = now.date_naive();
    let played_today = last_game_at
        .as_ref()
        .is_some_and(|last| last.with_timezone(&now.timezone()).date_naive() == today);
    if played_today {
        return last_game_at;
    }

    let Some(assumed) = now
        .clone()
        .checked_sub_signed(TimeDelta::hours(ASSUMED_ABSTINENCE_HOURS))
    else {
        return last_game_at;
    };
    debug!(
        "Protection | no session on {today} by hour {}, assuming {ASSUMED_ABSTINENCE_HOURS}h abstinence",
        now.hour()
    );
    Some(assumed)
}

/// [`compute_effective_last_game_at`] over epoch milliseconds, with calendar
/// days taken in `tz`.
///
/// Instants `tz` cannot represent leave `last_game_at_ms` untouched.
#[must_use]
pub fn compute_effective_last_game_at_millis<Tz: TimeZone>(
    last_game_at_ms: Option<i64>,
    now_ms: i64,
    tz: &Tz,
) -> Option<i64> {
    let Some(now) = tz.timestamp_millis_opt(now_ms).single() else {
        return last_game_at_ms;
    };
    let last = match last_game_at_ms {
        Some(ms) => match tz.timestamp_millis_opt(ms).single() {
            Some(last) => Some(last),
            None => return last_game_at_ms,
        },
        None => None,
    };
    compute_effective_last_game_at(last, &now).map(|effective| effective.timestamp_millis())
}

/// Whether the protection check should wait for the daily welcome.
///
/// True unless the welcome was already shown on `today`.
#[must_use]
pub fn should_defer_protection_check(last_welcome_shown: Option<&str>, today: &str) -> bool {
    last_welcome_shown != Some(today)
}

/// Calendar-day marker in the `Wed Jan 03 2024` layout.
#[must_use]
pub fn welcome_date_string(date: NaiveDate) -> String {
    date.format(WELCOME_DATE_FORMAT).to_string()
}
