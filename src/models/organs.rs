use serde::{Deserialize, Serialize};

use crate::models::item::Organ;

/// Live usage and limits for the three capacity pools.
///
/// Always re-read from the environment before acting on it; external
/// effects can change both usage and limits mid-run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganState {
    #[serde(default)]
    pub food_used: u32,
    #[serde(default)]
    pub food_limit: u32,
    #[serde(default)]
    pub booze_used: u32,
    #[serde(default)]
    pub booze_limit: u32,
    #[serde(default)]
    pub spleen_used: u32,
    #[serde(default)]
    pub spleen_limit: u32,
}

impl OrganState {
    pub fn used(&self, organ: Organ) -> u32 {
        match organ {
            Organ::Food => self.food_used,
            Organ::Booze => self.booze_used,
            Organ::Spleen => self.spleen_used,
        }
    }

    pub fn limit(&self, organ: Organ) -> u32 {
        match organ {
            Organ::Food => self.food_limit,
            Organ::Booze => self.booze_limit,
            Organ::Spleen => self.spleen_limit,
        }
    }

    pub fn remaining(&self, organ: Organ) -> u32 {
        self.limit(organ).saturating_sub(self.used(organ))
    }

    /// Usage counters only, for round-over-round progress comparison.
    pub fn usage(&self) -> (u32, u32, u32) {
        (self.food_used, self.booze_used, self.spleen_used)
    }
}

impl std::fmt::Display for OrganState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "food {}/{}, booze {}/{}, spleen {}/{}",
            self.food_used,
            self.food_limit,
            self.booze_used,
            self.booze_limit,
            self.spleen_used,
            self.spleen_limit
        )
    }
}
