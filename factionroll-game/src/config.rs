//! Roll tuning: faction tables, sleep window, and sleep chance.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{HOURS_PER_DAY, SLEEP_ROLL_CHANCE};
use crate::faction::{FACTIONS, Faction, SLEEP_FACTION};
use crate::sleep::SleepWindow;

const DEFAULT_ROLL_CONFIG: &str = include_str!("../data/roll_config.json");

/// Errors raised when roll configuration invariants are violated.
#[derive(Debug, Error)]
pub enum RollConfigError {
    #[error("sleep window {field} must be below 24 (got {value})")]
    HourOutOfRange { field: &'static str, value: u32 },
    #[error("sleep chance must be between 0.00 and 1.00 (got {value:.2})")]
    ChanceOutOfRange { value: f64 },
    #[error("faction list must not be empty")]
    NoFactions,
    #[error("roll config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollConfig {
    #[serde(default = "RollConfig::default_factions")]
    pub factions: Vec<Faction>,
    #[serde(default = "RollConfig::default_sleep_faction")]
    pub sleep_faction: Faction,
    #[serde(default)]
    pub sleep_window: SleepWindow,
    #[serde(default = "RollConfig::default_sleep_chance")]
    pub sleep_chance: f64,
}

impl RollConfig {
    fn default_factions() -> Vec<Faction> {
        FACTIONS.to_vec()
    }

    const fn default_sleep_faction() -> Faction {
        SLEEP_FACTION
    }

    const fn default_sleep_chance() -> f64 {
        SLEEP_ROLL_CHANCE
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_ROLL_CONFIG).unwrap_or_default()
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self::load_from_static()
    }

    /// Parse and validate a JSON roll configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any value is out of range.
    pub fn from_json_str(raw: &str) -> Result<Self, RollConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check hour bounds, sleep chance range, and the faction list.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), RollConfigError> {
        check_hour("start_hour", self.sleep_window.start_hour)?;
        check_hour("end_hour", self.sleep_window.end_hour)?;
        if !(0.0..=1.0).contains(&self.sleep_chance) {
            return Err(RollConfigError::ChanceOutOfRange {
                value: self.sleep_chance,
            });
        }
        if self.factions.is_empty() {
            return Err(RollConfigError::NoFactions);
        }
        Ok(())
    }
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            factions: Self::default_factions(),
            sleep_faction: Self::default_sleep_faction(),
            sleep_window: SleepWindow::default(),
            sleep_chance: Self::default_sleep_chance(),
        }
    }
}

fn check_hour(field: &'static str, value: u32) -> Result<(), RollConfigError> {
    if value < HOURS_PER_DAY {
        Ok(())
    } else {
        Err(RollConfigError::HourOutOfRange { field, value })
    }
}
