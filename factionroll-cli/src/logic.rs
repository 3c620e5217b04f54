use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;
use std::fs;
use std::path::Path;

use factionroll_game::{
    Faction, PoolRequest, RollConfig, RollSource, build_random_faction_pool_with,
    compute_effective_last_game_at, pick_random_faction, should_defer_protection_check,
    welcome_date_string,
};

/// Upper bound for `--rolls`.
pub const MAX_ROLLS: usize = 100_000;

/// One pool build plus pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollRecord {
    pub round: usize,
    pub pool: Vec<Faction>,
    pub picked: Option<Faction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollSummary {
    pub at: String,
    pub seed: Option<u64>,
    pub in_sleep_window: bool,
    pub sleep_chance: f64,
    pub sleep_picks: usize,
    pub rounds: Vec<RollRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectionSummary {
    pub now: String,
    pub last_game_at: Option<String>,
    pub effective_last_game_at: Option<String>,
    pub adjusted: bool,
    /// Minutes between the effective last game and `now`.
    pub abstinence_minutes: Option<i64>,
    pub today: String,
    pub last_welcome: Option<String>,
    pub defer_check: bool,
}

/// Load a roll config from disk, or the built-in defaults when no path is given.
pub fn load_roll_config(path: Option<&Path>) -> Result<RollConfig> {
    let Some(path) = path else {
        return Ok(RollConfig::default_config());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read roll config {}", path.display()))?;
    RollConfig::from_json_str(&raw)
        .with_context(|| format!("invalid roll config {}", path.display()))
}

/// Parse an RFC 3339 instant; its offset becomes the local zone.
pub fn parse_instant(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .with_context(|| format!("expected an RFC 3339 timestamp, got {raw:?}"))
}

/// Resolve `--at`, falling back to the system clock in the local zone.
pub fn resolve_instant(raw: Option<&str>) -> Result<DateTime<FixedOffset>> {
    raw.map_or_else(|| Ok(Local::now().fixed_offset()), parse_instant)
}

/// Run `rounds` independent pool builds and picks at `now`.
pub fn run_rolls(
    cfg: &RollConfig,
    now: &DateTime<FixedOffset>,
    rounds: usize,
    seed: Option<u64>,
    rng: &mut dyn RollSource,
) -> Result<RollSummary> {
    if rounds == 0 {
        bail!("--rolls must be at least 1");
    }
    if rounds > MAX_ROLLS {
        bail!("--rolls must be at most {MAX_ROLLS}, got {rounds}");
    }

    let mut records = Vec::with_capacity(rounds);
    for round in 1..=rounds {
        let pool = build_random_faction_pool_with(
            PoolRequest {
                base_factions: cfg.factions.as_slice(),
                sleep_faction: cfg.sleep_faction,
                date: now,
                rng: &mut *rng,
            },
            cfg,
        );
        let picked = pick_random_faction(&pool, &mut *rng).copied();
        log::debug!("Round {round}: pool {pool:?} picked {picked:?}");
        records.push(RollRecord {
            round,
            pool,
            picked,
        });
    }

    let sleep_picks = records
        .iter()
        .filter(|r| r.picked == Some(cfg.sleep_faction))
        .count();

    Ok(RollSummary {
        at: now.to_rfc3339(),
        seed,
        in_sleep_window: cfg.sleep_window.contains(now),
        sleep_chance: cfg.sleep_chance,
        sleep_picks,
        rounds: records,
    })
}

/// Evaluate both protection helpers for `now`.
#[must_use]
pub fn evaluate_protection(
    now: &DateTime<FixedOffset>,
    last_game_at: Option<DateTime<FixedOffset>>,
    last_welcome: Option<&str>,
) -> ProtectionSummary {
    let effective = compute_effective_last_game_at(last_game_at, now);
    let today = welcome_date_string(now.date_naive());
    let abstinence_minutes = effective.map(|at| (*now - at).num_minutes());

    ProtectionSummary {
        now: now.to_rfc3339(),
        last_game_at: last_game_at.map(|at| at.to_rfc3339()),
        effective_last_game_at: effective.map(|at| at.to_rfc3339()),
        adjusted: effective != last_game_at,
        abstinence_minutes,
        defer_check: should_defer_protection_check(last_welcome, &today),
        today,
        last_welcome: last_welcome.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factionroll_game::{FACTIONS, SLEEP_FACTION, create_sequence_rng};

    fn temp_path(label: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "factionroll-logic-{label}-{}.json",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    fn instant(raw: &str) -> DateTime<FixedOffset> {
        parse_instant(raw).unwrap()
    }

    #[test]
    fn parse_instant_keeps_offset() {
        let at = instant("2024-01-03T12:30:00+09:00");
        assert_eq!(at.offset().local_minus_utc(), 9 * 3600);
        assert!(parse_instant("yesterday").is_err());
    }

    #[test]
    fn resolve_instant_prefers_explicit_value() {
        let at = resolve_instant(Some("2023-01-01T22:15:00Z")).unwrap();
        assert_eq!(at, instant("2023-01-01T22:15:00+00:00"));
        assert!(resolve_instant(None).is_ok());
    }

    #[test]
    fn night_rolls_record_sleep_only_pools() {
        let cfg = RollConfig::default();
        let now = instant("2023-01-01T23:00:00Z");
        let mut rng = create_sequence_rng([0.1, 0.4, 0.9, 0.0]);
        let summary = run_rolls(&cfg, &now, 2, None, &mut rng).unwrap();

        assert!(summary.in_sleep_window);
        assert_eq!(summary.rounds[0].pool, vec![SLEEP_FACTION]);
        assert_eq!(summary.rounds[0].picked, Some(SLEEP_FACTION));
        assert_eq!(summary.rounds[1].pool, FACTIONS.to_vec());
        assert_eq!(summary.rounds[1].picked, Some(FACTIONS[0]));
        assert_eq!(summary.sleep_picks, 1);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn daytime_rolls_draw_once_per_round() {
        let cfg = RollConfig::default();
        let now = instant("2023-01-01T12:00:00Z");
        let mut rng = create_sequence_rng([0.75]);
        let summary = run_rolls(&cfg, &now, 3, Some(9), &mut rng).unwrap();

        assert!(!summary.in_sleep_window);
        assert_eq!(summary.seed, Some(9));
        assert!(summary.rounds.iter().all(|r| r.picked == Some(FACTIONS[3])));
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let cfg = RollConfig::default();
        let now = instant("2023-01-01T12:00:00Z");
        let mut rng = || 0.5;
        assert!(run_rolls(&cfg, &now, 0, None, &mut rng).is_err());
    }

    #[test]
    fn oversized_round_count_is_rejected_without_rolling() {
        let cfg = RollConfig::default();
        let now = instant("2023-01-01T23:00:00Z");
        let mut rng = create_sequence_rng([0.5]);
        let err = run_rolls(&cfg, &now, usize::MAX, None, &mut rng).unwrap_err();
        assert!(err.to_string().contains("at most"));
        assert!(run_rolls(&cfg, &now, MAX_ROLLS + 1, None, &mut rng).is_err());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn protection_summary_after_noon_without_session() {
        let now = instant("2024-01-02T13:00:00Z");
        let summary = evaluate_protection(&now, None, Some("Mon Jan 01 2024"));

        assert!(summary.adjusted);
        assert_eq!(summary.abstinence_minutes, Some(180));
        assert_eq!(summary.today, "Tue Jan 02 2024");
        assert!(summary.defer_check);
    }

    #[test]
    fn protection_summary_keeps_same_day_session() {
        let now = instant("2024-01-02T13:00:00Z");
        let morning = instant("2024-01-02T10:15:00Z");
        let summary = evaluate_protection(&now, Some(morning), Some("Tue Jan 02 2024"));

        assert!(!summary.adjusted);
        assert_eq!(summary.effective_last_game_at, summary.last_game_at);
        assert_eq!(summary.abstinence_minutes, Some(165));
        assert!(!summary.defer_check);
    }

    #[test]
    fn missing_config_file_reports_path() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let err = load_roll_config(Some(path.as_path())).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read roll config"));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let path = temp_path("config");
        fs::write(&path, r#"{"factions": ["tide"], "sleep_chance": 0.0}"#).unwrap();
        let cfg = load_roll_config(Some(path.as_path())).unwrap();
        assert_eq!(cfg.factions, vec![Faction::Tide]);
        assert!(cfg.sleep_chance.abs() < f64::EPSILON);
    }
}
