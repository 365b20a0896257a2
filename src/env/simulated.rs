use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::env::{ConsumeKind, Environment};
use crate::models::{Item, ItemKind, Organ, OrganState, Precondition};

/// Persisted environment state for simulated runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimState {
    #[serde(default)]
    pub organs: OrganState,

    /// Value of one ordinary turn.
    #[serde(default)]
    pub turn_value: f64,

    /// Value of one bonus encounter; 0 means "derive from turn value".
    #[serde(default)]
    pub encounter_value: f64,

    /// Turns expected to be spent today, before diet gains.
    #[serde(default)]
    pub turn_budget: f64,

    /// Bonus encounters already locked in before planning.
    #[serde(default)]
    pub base_encounters: f64,

    /// Expected bonus encounters for the nth copy unit, best first.
    #[serde(default)]
    pub encounter_slots: Vec<f64>,

    /// Steady-state encounters per copy unit once slots run out.
    #[serde(default)]
    pub marginal_encounters: f64,

    /// Live unit prices; items absent here fall back to catalog prices.
    #[serde(default)]
    pub prices: HashMap<String, f64>,

    /// Finite stock caps; items absent here are freely purchasable.
    #[serde(default)]
    pub stock: HashMap<String, u32>,

    /// Elemental resistance levels for precondition checks.
    #[serde(default)]
    pub resistances: HashMap<String, u32>,

    /// Items whose consumption is scripted to fail.
    #[serde(default)]
    pub failing_items: HashSet<String>,

    /// Helpers scripted to fail to apply.
    #[serde(default)]
    pub failing_helpers: HashSet<String>,
}

/// What the environment was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvEvent {
    Acquire { item: String, quantity: u32 },
    Consume { kind: ConsumeKind, item: String, quantity: u32 },
    ApplyHelper { item: String },
}

/// In-process `Environment` backed by a `SimState` snapshot and the
/// item catalog (needed to advance organ usage on consumption).
pub struct SimulatedEnvironment {
    state: SimState,
    items: HashMap<String, Item>,
    /// Transcript of primitive calls, oldest first.
    pub events: Vec<EnvEvent>,
}

impl SimulatedEnvironment {
    pub fn new(state: SimState, items: &[Item]) -> Self {
        let items = items.iter().map(|i| (i.key(), i.clone())).collect();
        Self {
            state,
            items,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn into_state(self) -> SimState {
        self.state
    }

    fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(&name.to_lowercase())
    }

    fn advance_organs(&mut self, name: &str, quantity: u32) -> bool {
        let Some(item) = self.item(name).cloned() else {
            return false;
        };
        if let Some(organ) = item.organ {
            let needed = item.size * quantity;
            if needed > self.state.organs.remaining(organ) {
                return false;
            }
            match organ {
                Organ::Food => self.state.organs.food_used += needed,
                Organ::Booze => self.state.organs.booze_used += needed,
                Organ::Spleen => self.state.organs.spleen_used += needed,
            }
        }
        if let ItemKind::Cleaner(effect) = &item.kind {
            let organs = &mut self.state.organs;
            organs.food_used = organs.food_used.saturating_sub(effect.food * quantity);
            organs.booze_used = organs.booze_used.saturating_sub(effect.booze * quantity);
            organs.spleen_used = organs.spleen_used.saturating_sub(effect.spleen * quantity);
        }
        true
    }
}

impl Environment for SimulatedEnvironment {
    fn lookup_price(&self, item: &str) -> f64 {
        if let Some(price) = self.state.prices.get(&item.to_lowercase()) {
            return *price;
        }
        self.item(item).map(|i| i.price).unwrap_or(0.0)
    }

    fn acquire(&mut self, quantity: u32, item: &str, max_unit_price: f64) -> u32 {
        if quantity == 0 || self.lookup_price(item) > max_unit_price {
            return 0;
        }
        let key = item.to_lowercase();
        let obtained = match self.state.stock.get_mut(&key) {
            Some(stock) => {
                let taken = quantity.min(*stock);
                *stock -= taken;
                taken
            }
            None => quantity,
        };
        if obtained > 0 {
            self.events.push(EnvEvent::Acquire {
                item: item.to_string(),
                quantity: obtained,
            });
        }
        obtained
    }

    fn consume_primitive(&mut self, kind: ConsumeKind, quantity: u32, item: &str) -> bool {
        if self.state.failing_items.contains(&item.to_lowercase()) {
            return false;
        }
        if !self.advance_organs(item, quantity) {
            return false;
        }
        self.events.push(EnvEvent::Consume {
            kind,
            item: item.to_string(),
            quantity,
        });
        true
    }

    fn read_organ_state(&self) -> OrganState {
        self.state.organs
    }

    fn apply_helper(&mut self, item: &str) -> bool {
        if self.state.failing_helpers.contains(&item.to_lowercase()) {
            return false;
        }
        self.events.push(EnvEvent::ApplyHelper {
            item: item.to_string(),
        });
        true
    }

    fn ensure_precondition(&mut self, precondition: &Precondition) -> bool {
        match precondition {
            Precondition::MinResistance { element, required } => self
                .state
                .resistances
                .get(&element.to_lowercase())
                .is_some_and(|level| level >= required),
        }
    }

    fn available_stock(&self, item: &str) -> Option<u32> {
        self.state.stock.get(&item.to_lowercase()).copied()
    }
}
