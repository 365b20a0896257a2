use std::collections::HashMap;

use crate::models::entry::{CatalogEntry, HelperEntry};
use crate::models::item::Organ;
use crate::models::organs::OrganState;

/// One line of a finalized plan: an entry and how many units to consume.
///
/// `quantity` only ever decreases once execution begins.
#[derive(Debug, Clone)]
pub struct DietEntry {
    pub entry: CatalogEntry,
    pub quantity: u32,
}

impl DietEntry {
    pub fn new(entry: CatalogEntry, quantity: u32) -> Self {
        Self { entry, quantity }
    }

    pub fn helpers(&self) -> &[HelperEntry] {
        &self.entry.helpers
    }

    /// Expected (value, price) over the planned quantity.
    pub fn expected_totals(&self) -> (f64, f64) {
        self.entry.totals_for(self.quantity)
    }

    pub fn expected_turns(&self) -> f64 {
        self.entry.item.turn_yield * self.quantity as f64
    }
}

/// A finalized allocation. Immutable once produced by the planner; the
/// executor works on its own copy.
#[derive(Debug, Clone, Default)]
pub struct DietPlan {
    pub entries: Vec<DietEntry>,
    pub expected_value: f64,
    pub expected_price: f64,
}

impl DietPlan {
    pub fn new(entries: Vec<DietEntry>) -> Self {
        let (expected_value, expected_price) = entries
            .iter()
            .map(DietEntry::expected_totals)
            .fold((0.0, 0.0), |(v, p), (ev, ep)| (v + ev, p + ep));
        Self {
            entries,
            expected_value,
            expected_price,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn net_value(&self) -> f64 {
        self.expected_value - self.expected_price
    }

    pub fn total_quantity(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    pub fn expected_turns(&self) -> f64 {
        self.entries.iter().map(DietEntry::expected_turns).sum()
    }

    /// Units planned for entries that generate bonus encounters.
    pub fn copy_quantity(&self) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.entry.item.copy_source)
            .map(|e| e.quantity)
            .sum()
    }

    /// Capacity invariant: per organ, planned size never exceeds the
    /// remaining room in `state`.
    pub fn fits_within(&self, state: &OrganState) -> bool {
        let mut needed: HashMap<Organ, u64> = HashMap::new();
        for entry in &self.entries {
            if let Some(organ) = entry.entry.organ() {
                *needed.entry(organ).or_insert(0) +=
                    entry.entry.unit_size() as u64 * entry.quantity as u64;
            }
        }
        needed
            .into_iter()
            .all(|(organ, size)| size <= state.remaining(organ) as u64)
    }

    /// Re-order for execution: highest priority first, declaration order
    /// preserved within a priority band.
    pub fn sort_for_consumption(&mut self) {
        self.entries
            .sort_by_key(|e| std::cmp::Reverse(e.entry.priority));
    }

    /// Remaining (item, quantity) pairs, for stall diagnostics.
    pub fn remaining_summary(&self) -> Vec<(String, u32)> {
        self.entries
            .iter()
            .filter(|e| e.quantity > 0)
            .map(|e| (e.entry.item.name.clone(), e.quantity))
            .collect()
    }
}
