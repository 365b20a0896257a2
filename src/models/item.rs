use serde::{Deserialize, Serialize};

/// One of the three capacity pools that bound consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Organ {
    Food,
    Booze,
    Spleen,
}

/// Per-unit usage reduction applied by a cleaner item.
///
/// A single item can clean more than one organ at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanerEffect {
    #[serde(default)]
    pub food: u32,
    #[serde(default)]
    pub booze: u32,
    #[serde(default)]
    pub spleen: u32,
}

impl CleanerEffect {
    pub fn for_organ(&self, organ: Organ) -> u32 {
        match organ {
            Organ::Food => self.food,
            Organ::Booze => self.booze,
            Organ::Spleen => self.spleen,
        }
    }
}

/// How an item is dispatched during consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// Acquired and consumed through the organ primitive.
    Standard,
    /// One unit grants a chosen effect; never re-attempted after the
    /// first use.
    EffectGrant { effect: String },
    /// Reduces organ usage instead of (or in addition to) adding to it.
    Cleaner(CleanerEffect),
    /// Needs a raw material acquired immediately before use.
    RequiresMaterial { material: String },
    /// Applied via the helper primitive; never a main item.
    Helper,
}

impl Default for ItemKind {
    fn default() -> Self {
        ItemKind::Standard
    }
}

/// A check that must pass before an item can be dispatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Precondition {
    MinResistance { element: String, required: u32 },
}

/// A lasting buff granted per unit consumed. Its worth depends on how
/// many turns and bonus encounters the buff window will cover, so the
/// value curve is recomputed on every convergence iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    /// Turns of effect granted per unit.
    pub duration: f64,
    /// Value added per ordinary turn covered.
    #[serde(default)]
    pub value_per_turn: f64,
    /// Extra value per bonus encounter covered.
    #[serde(default)]
    pub value_per_encounter: f64,
}

/// Reference to a helper item that accompanies a main item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelperRef {
    pub name: String,
    #[serde(default)]
    pub required: bool,
}

/// Static metadata for one consumable candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,

    #[serde(default)]
    pub organ: Option<Organ>,

    /// Capacity consumed per unit; 0 for helpers and organ-free items.
    #[serde(default)]
    pub size: u32,

    /// Average turns granted per unit consumed.
    #[serde(default)]
    pub turn_yield: f64,

    /// Fallback unit price when the live lookup has no quote.
    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub kind: ItemKind,

    /// Consumption adds expected bonus encounters.
    #[serde(default)]
    pub copy_source: bool,

    /// Lasting buff granted per unit, valued against the turn budget.
    #[serde(default)]
    pub effect: Option<EffectSpec>,

    #[serde(default)]
    pub max_quantity: Option<u32>,

    #[serde(default)]
    pub helpers: Vec<HelperRef>,

    /// Cosmetically different items serving the same purpose share a
    /// group; only the cheapest member enters the menu.
    #[serde(default)]
    pub variant_group: Option<String>,

    /// Explicit value curve; overrides the computed tiers when present.
    #[serde(default)]
    pub tiers: Vec<TierSpec>,

    #[serde(default)]
    pub precondition: Option<Precondition>,

    /// Consumption-order override; higher is consumed earlier.
    #[serde(default)]
    pub priority: Option<i32>,
}

/// One explicit (cumulative quantity, marginal value, marginal price)
/// step supplied by the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierSpec {
    pub quantity: u32,
    pub value: f64,
    #[serde(default)]
    pub price: Option<f64>,
}

impl Item {
    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Capacity-consuming items must name an organ.
    pub fn is_valid(&self) -> bool {
        (self.size == 0 || self.organ.is_some()) && self.turn_yield >= 0.0 && self.price >= 0.0
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl Eq for Item {}

impl std::hash::Hash for Item {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.to_lowercase().hash(state);
    }
}
