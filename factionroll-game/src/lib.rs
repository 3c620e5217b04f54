//! Factionroll Game Helpers
//!
//! Platform-agnostic faction rolling and protection scheduling logic.
//! Every helper is a pure function over explicit inputs: the caller supplies
//! the instant (in whatever time zone counts as local) and the roll source,
//! so results are fully reproducible in tests.

pub mod config;
pub mod constants;
pub mod faction;
pub mod numbers;
pub mod pool;
pub mod protection;
pub mod rng;
pub mod sleep;

// Re-export commonly used types
pub use config::{RollConfig, RollConfigError};
pub use faction::{FACTIONS, Faction, SLEEP_FACTION};
pub use pool::{
    PoolRequest, build_faction_pool, build_random_faction_pool, build_random_faction_pool_with,
    pick_random_faction, roll_faction,
};
pub use protection::{
    compute_effective_last_game_at, compute_effective_last_game_at_millis,
    should_defer_protection_check, welcome_date_string,
};
pub use rng::{RngRolls, RollSource, SeededRolls, SequenceRng, create_sequence_rng, thread_rolls};
pub use sleep::{SleepWindow, is_sleep_window};
