//! Faction identifiers and the shared faction tables.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Faction {
    Ember,
    Tide,
    Grove,
    Gale,
    /// Night-only faction; see [`crate::pool::build_random_faction_pool`].
    Sleep,
}

impl Faction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ember => "ember",
            Self::Tide => "tide",
            Self::Grove => "grove",
            Self::Gale => "gale",
            Self::Sleep => "sleep",
        }
    }

    #[must_use]
    pub const fn is_sleep(self) -> bool {
        matches!(self, Self::Sleep)
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Faction> for String {
    fn from(value: Faction) -> Self {
        value.as_str().to_string()
    }
}

/// Base factions available at any hour, in pool order.
pub const FACTIONS: [Faction; 4] = [Faction::Ember, Faction::Tide, Faction::Grove, Faction::Gale];

pub const SLEEP_FACTION: Faction = Faction::Sleep;
