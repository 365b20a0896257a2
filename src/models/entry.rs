use crate::models::item::{Item, ItemKind, Organ};

/// One discrete step in an item's diminishing-return value curve.
///
/// `quantity` is the cumulative unit bound for this step; `value` and
/// `price` are per-unit marginals. `u32::MAX` marks an open-ended final
/// tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTier {
    pub quantity: u32,
    pub value: f64,
    pub price: f64,
}

impl ValueTier {
    pub fn net(&self) -> f64 {
        self.value - self.price
    }
}

/// A helper attached to a main entry, applied before every consumption.
#[derive(Debug, Clone)]
pub struct HelperEntry {
    pub item: Item,
    pub required: bool,
}

/// One allocatable candidate: static item metadata plus its computed
/// value curve and helper chain.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub item: Item,
    /// Non-increasing in marginal value.
    pub tiers: Vec<ValueTier>,
    pub helpers: Vec<HelperEntry>,
    /// Distinguishes otherwise-identical variants in reports.
    pub tag: Option<String>,
    /// Consumption order; higher is consumed earlier.
    pub priority: i32,
}

impl CatalogEntry {
    pub fn new(item: Item, tiers: Vec<ValueTier>) -> Self {
        let priority = item.priority.unwrap_or(default_priority(&item.kind));
        Self {
            item,
            tiers,
            helpers: Vec::new(),
            tag: None,
            priority,
        }
    }

    pub fn organ(&self) -> Option<Organ> {
        self.item.organ
    }

    pub fn unit_size(&self) -> u32 {
        self.item.size
    }

    /// Hard unit cap: the item limit and the last tier bound combined.
    pub fn quantity_cap(&self) -> u32 {
        let tier_cap = self.tiers.last().map(|t| t.quantity).unwrap_or(0);
        match self.item.max_quantity {
            Some(max) => max.min(tier_cap),
            None => tier_cap,
        }
    }

    /// Marginal net value of the best tier, or 0 for an empty curve.
    pub fn best_net(&self) -> f64 {
        self.tiers.first().map(ValueTier::net).unwrap_or(0.0)
    }

    /// Marginal (value, price) of the `n`th unit, 1-indexed.
    pub fn unit_marginals(&self, n: u32) -> Option<(f64, f64)> {
        self.tiers
            .iter()
            .find(|t| n <= t.quantity)
            .map(|t| (t.value, t.price))
    }

    /// Cumulative (value, price) over the first `quantity` units.
    pub fn totals_for(&self, quantity: u32) -> (f64, f64) {
        let mut value = 0.0;
        let mut price = 0.0;
        for n in 1..=quantity {
            if let Some((v, p)) = self.unit_marginals(n) {
                value += v;
                price += p;
            }
        }
        (value, price)
    }
}

/// Cleaners and effect grants unlock capacity or buffs and must be
/// consumed before ordinary entries.
pub fn default_priority(kind: &ItemKind) -> i32 {
    match kind {
        ItemKind::Cleaner(_) | ItemKind::EffectGrant { .. } => 100,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::CleanerEffect;

    fn entry_with_tiers(tiers: Vec<ValueTier>) -> CatalogEntry {
        let item = Item {
            name: "Pickle Juice".to_string(),
            organ: Some(Organ::Booze),
            size: 5,
            turn_yield: 20.0,
            price: 10_000.0,
            kind: ItemKind::Standard,
            copy_source: false,
            effect: None,
            max_quantity: Some(4),
            helpers: Vec::new(),
            variant_group: None,
            tiers: Vec::new(),
            precondition: None,
            priority: None,
        };
        CatalogEntry::new(item, tiers)
    }

    #[test]
    fn test_unit_marginals_follow_tiers() {
        let entry = entry_with_tiers(vec![
            ValueTier {
                quantity: 2,
                value: 10.0,
                price: 2.0,
            },
            ValueTier {
                quantity: 5,
                value: 6.0,
                price: 2.0,
            },
        ]);
        assert_eq!(entry.unit_marginals(1), Some((10.0, 2.0)));
        assert_eq!(entry.unit_marginals(2), Some((10.0, 2.0)));
        assert_eq!(entry.unit_marginals(3), Some((6.0, 2.0)));
        assert_eq!(entry.unit_marginals(6), None);
    }

    #[test]
    fn test_quantity_cap_respects_item_limit() {
        let entry = entry_with_tiers(vec![ValueTier {
            quantity: 10,
            value: 8.0,
            price: 1.0,
        }]);
        // Item max_quantity (4) is tighter than the tier bound.
        assert_eq!(entry.quantity_cap(), 4);
    }

    #[test]
    fn test_totals_accumulate_marginals() {
        let entry = entry_with_tiers(vec![
            ValueTier {
                quantity: 1,
                value: 10.0,
                price: 2.0,
            },
            ValueTier {
                quantity: 3,
                value: 4.0,
                price: 2.0,
            },
        ]);
        let (value, price) = entry.totals_for(3);
        assert_eq!(value, 18.0);
        assert_eq!(price, 6.0);
    }

    #[test]
    fn test_default_priority_by_kind() {
        assert_eq!(default_priority(&ItemKind::Standard), 0);
        assert_eq!(
            default_priority(&ItemKind::Cleaner(CleanerEffect::default())),
            100
        );
        assert_eq!(
            default_priority(&ItemKind::EffectGrant {
                effect: "Refined Palate".to_string()
            }),
            100
        );
    }
}
