pub mod entry;
pub mod item;
pub mod organs;
pub mod plan;

pub use entry::{CatalogEntry, HelperEntry, ValueTier};
pub use item::{CleanerEffect, EffectSpec, HelperRef, Item, ItemKind, Organ, Precondition, TierSpec};
pub use organs::OrganState;
pub use plan::{DietEntry, DietPlan};
