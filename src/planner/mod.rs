pub mod balance;
pub mod constants;
pub mod knapsack;
pub mod menu;
pub mod value;

pub use balance::{balance, BonusEncounters};
pub use constants::*;
pub use knapsack::plan;
pub use menu::build_menu;
pub use value::{compute_tiers, EncounterSlots, ValueContext};
