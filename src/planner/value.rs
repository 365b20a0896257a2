use crate::models::{EffectSpec, Item, ValueTier};

/// Game-economy context the value curves are computed from. Rebuilt
/// fresh for every convergence iteration; never mutated in place.
#[derive(Debug, Clone, Copy)]
pub struct ValueContext {
    /// Value of one ordinary turn.
    pub turn_value: f64,
    /// Value of one bonus encounter.
    pub encounter_value: f64,
    /// Turns expected to be spent, including diet gains so far.
    pub turn_budget: f64,
    /// Expected bonus encounters, including the current estimate.
    pub bonus_encounters: f64,
}

impl ValueContext {
    /// What a bonus encounter is worth over an ordinary turn.
    pub fn encounter_premium(&self) -> f64 {
        (self.encounter_value - self.turn_value).max(0.0)
    }
}

/// Supply curve of bonus-encounter opportunities: the nth copy unit
/// consumed claims the nth slot, best first.
#[derive(Debug, Clone, Default)]
pub struct EncounterSlots {
    pub per_unit: Vec<f64>,
    /// Steady-state encounters per unit once ranked slots run out.
    pub marginal: f64,
}

impl EncounterSlots {
    /// Expected bonus encounters from consuming `copies` copy units:
    /// the best `copies` slots, then the marginal rate for the rest.
    pub fn expected_encounters(&self, copies: u32) -> f64 {
        let copies = copies as usize;
        let ranked: f64 = self.per_unit.iter().take(copies).sum();
        let overflow = copies.saturating_sub(self.per_unit.len());
        ranked + overflow as f64 * self.marginal
    }
}

/// Single flat tier: every unit is worth the same expected turns.
pub fn flat_tiers(item: &Item, ctx: &ValueContext) -> Vec<ValueTier> {
    let value = item.turn_yield * ctx.turn_value;
    if value <= 0.0 {
        return Vec::new();
    }
    vec![ValueTier {
        quantity: item.max_quantity.unwrap_or(u32::MAX),
        value,
        price: item.price,
    }]
}

/// One single-unit tier per remaining encounter slot, then an
/// open-ended tier at the marginal rate. Slot payoffs are sorted before
/// emission in case the supplied ranking is not already descending.
pub fn copy_tiers(item: &Item, slots: &EncounterSlots, ctx: &ValueContext) -> Vec<ValueTier> {
    let premium = ctx.encounter_premium();
    let base = item.turn_yield * ctx.turn_value;

    let mut payoffs = slots.per_unit.clone();
    payoffs.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let marginal_value = base + slots.marginal * premium;

    // Ranked single-unit tiers, keeping only slots that beat the
    // steady state so the curve stays non-increasing.
    let mut tiers: Vec<ValueTier> = payoffs
        .iter()
        .map(|encounters| base + encounters * premium)
        .filter(|value| *value >= marginal_value)
        .enumerate()
        .map(|(rank, value)| ValueTier {
            quantity: rank as u32 + 1,
            value,
            price: item.price,
        })
        .collect();

    let cap = item.max_quantity.unwrap_or(u32::MAX);
    if marginal_value > 0.0 && cap > tiers.len() as u32 {
        tiers.push(ValueTier {
            quantity: cap,
            value: marginal_value,
            price: item.price,
        });
    }
    clamp_to_max(tiers, item.max_quantity)
}

/// Buff items are valued against the turns their effect will cover:
/// units whose window overlaps expected bonus encounters carry the
/// encounter premium, the rest are worth plain turn coverage, and
/// nothing past the turn budget is worth buying.
pub fn effect_tiers(item: &Item, spec: &EffectSpec, ctx: &ValueContext) -> Vec<ValueTier> {
    if spec.duration <= 0.0 || ctx.turn_budget <= 0.0 {
        return Vec::new();
    }
    let base = spec.duration * spec.value_per_turn + item.turn_yield * ctx.turn_value;

    let budget_units = (ctx.turn_budget / spec.duration).ceil() as u32;
    let encounter_units =
        ((ctx.bonus_encounters / spec.duration).ceil() as u32).min(budget_units);

    let mut tiers = Vec::new();
    if encounter_units > 0 {
        let encounters_per_unit = ctx.bonus_encounters / encounter_units as f64;
        tiers.push(ValueTier {
            quantity: encounter_units,
            value: base + encounters_per_unit * spec.value_per_encounter,
            price: item.price,
        });
    }
    if budget_units > encounter_units && base > 0.0 {
        tiers.push(ValueTier {
            quantity: budget_units,
            value: base,
            price: item.price,
        });
    }
    clamp_to_max(tiers, item.max_quantity)
}

/// Explicit catalog curves pass through after a non-increasing sort.
pub fn explicit_tiers(item: &Item) -> Vec<ValueTier> {
    let mut spans: Vec<(u32, f64, f64)> = Vec::new();
    let mut previous = 0u32;
    for spec in &item.tiers {
        let units = spec.quantity.saturating_sub(previous);
        if units == 0 {
            continue;
        }
        spans.push((units, spec.value, spec.price.unwrap_or(item.price)));
        previous = spec.quantity;
    }
    spans.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut cumulative = 0u32;
    let tiers = spans
        .into_iter()
        .map(|(units, value, price)| {
            cumulative = cumulative.saturating_add(units);
            ValueTier {
                quantity: cumulative,
                value,
                price,
            }
        })
        .collect();
    clamp_to_max(tiers, item.max_quantity)
}

fn clamp_to_max(tiers: Vec<ValueTier>, max_quantity: Option<u32>) -> Vec<ValueTier> {
    let Some(max) = max_quantity else {
        return tiers;
    };
    let mut clamped = Vec::new();
    let mut previous = 0u32;
    for mut tier in tiers {
        if previous >= max {
            break;
        }
        tier.quantity = tier.quantity.min(max);
        previous = tier.quantity;
        clamped.push(tier);
    }
    clamped
}

/// Value curve for one item under the current context. Explicit curves
/// win; copy-source items tier against the slot ranking; buff items
/// tier against turn and encounter coverage; everything else gets a
/// flat per-unit curve.
pub fn compute_tiers(item: &Item, slots: &EncounterSlots, ctx: &ValueContext) -> Vec<ValueTier> {
    if !item.tiers.is_empty() {
        explicit_tiers(item)
    } else if item.copy_source {
        copy_tiers(item, slots, ctx)
    } else if let Some(effect) = &item.effect {
        effect_tiers(item, effect, ctx)
    } else {
        flat_tiers(item, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemKind, Organ, TierSpec};
    use assert_float_eq::assert_float_absolute_eq;

    fn ctx() -> ValueContext {
        ValueContext {
            turn_value: 1000.0,
            encounter_value: 4000.0,
            turn_budget: 100.0,
            bonus_encounters: 0.0,
        }
    }

    fn item(name: &str) -> Item {
        Item {
            name: name.to_string(),
            organ: Some(Organ::Spleen),
            size: 1,
            turn_yield: 0.0,
            price: 500.0,
            kind: ItemKind::Standard,
            copy_source: false,
            effect: None,
            max_quantity: None,
            helpers: Vec::new(),
            variant_group: None,
            tiers: Vec::new(),
            precondition: None,
            priority: None,
        }
    }

    #[test]
    fn test_flat_tiers_single_step() {
        let mut stew = item("Stew");
        stew.turn_yield = 5.0;
        stew.max_quantity = Some(3);

        let tiers = flat_tiers(&stew, &ctx());
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].quantity, 3);
        assert_float_absolute_eq!(tiers[0].value, 5000.0);
    }

    #[test]
    fn test_copy_tiers_rank_slots_then_marginal() {
        let pill = item("Extro Pill");
        let slots = EncounterSlots {
            per_unit: vec![3.0, 2.0],
            marginal: 0.5,
        };

        let tiers = copy_tiers(&pill, &slots, &ctx());
        // Two ranked single-unit tiers, then the open marginal tier.
        assert_eq!(tiers.len(), 3);
        assert_eq!(tiers[0].quantity, 1);
        assert_float_absolute_eq!(tiers[0].value, 9000.0);
        assert_eq!(tiers[1].quantity, 2);
        assert_float_absolute_eq!(tiers[1].value, 6000.0);
        assert_eq!(tiers[2].quantity, u32::MAX);
        assert_float_absolute_eq!(tiers[2].value, 1500.0);
    }

    #[test]
    fn test_copy_tiers_sorted_when_ranking_is_not() {
        let pill = item("Extro Pill");
        let slots = EncounterSlots {
            per_unit: vec![1.0, 3.0],
            marginal: 0.0,
        };

        let tiers = copy_tiers(&pill, &slots, &ctx());
        for window in tiers.windows(2) {
            assert!(window[0].value >= window[1].value);
        }
    }

    #[test]
    fn test_expected_encounters_slices_best_slots() {
        let slots = EncounterSlots {
            per_unit: vec![3.0, 2.0, 1.0],
            marginal: 0.5,
        };
        assert_float_absolute_eq!(slots.expected_encounters(0), 0.0);
        assert_float_absolute_eq!(slots.expected_encounters(2), 5.0);
        // Past the ranked slots: 6.0 ranked + 2 x 0.5 marginal.
        assert_float_absolute_eq!(slots.expected_encounters(5), 7.0);
    }

    #[test]
    fn test_effect_tiers_split_encounter_and_budget_coverage() {
        let mut cologne = item("Cologne");
        cologne.effect = Some(EffectSpec {
            duration: 20.0,
            value_per_turn: 100.0,
            value_per_encounter: 3000.0,
        });

        let context = ValueContext {
            turn_value: 1000.0,
            encounter_value: 4000.0,
            turn_budget: 100.0,
            bonus_encounters: 10.0,
        };
        let tiers = effect_tiers(&cologne, &cologne.effect.clone().unwrap(), &context);

        // 10 encounters fit inside one 20-turn window; 100 turns need 5.
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].quantity, 1);
        assert_float_absolute_eq!(tiers[0].value, 2000.0 + 10.0 * 3000.0);
        assert_eq!(tiers[1].quantity, 5);
        assert_float_absolute_eq!(tiers[1].value, 2000.0);
    }

    #[test]
    fn test_effect_tiers_grow_with_bonus_encounters() {
        let mut cologne = item("Cologne");
        cologne.effect = Some(EffectSpec {
            duration: 10.0,
            value_per_turn: 50.0,
            value_per_encounter: 2000.0,
        });
        let spec = cologne.effect.clone().unwrap();

        let quiet = ValueContext {
            turn_value: 1000.0,
            encounter_value: 4000.0,
            turn_budget: 50.0,
            bonus_encounters: 0.0,
        };
        let busy = ValueContext {
            bonus_encounters: 8.0,
            ..quiet
        };

        let quiet_best = effect_tiers(&cologne, &spec, &quiet)[0].value;
        let busy_best = effect_tiers(&cologne, &spec, &busy)[0].value;
        assert!(busy_best > quiet_best);
    }

    #[test]
    fn test_explicit_tiers_sorted_and_clamped() {
        let mut tonic = item("Tonic");
        tonic.max_quantity = Some(3);
        tonic.tiers = vec![
            TierSpec {
                quantity: 2,
                value: 400.0,
                price: None,
            },
            TierSpec {
                quantity: 4,
                value: 900.0,
                price: Some(100.0),
            },
        ];

        let tiers = explicit_tiers(&tonic);
        // The higher-valued span sorts first, curve clamped at 3 units.
        assert_float_absolute_eq!(tiers[0].value, 900.0);
        assert_eq!(tiers[0].quantity, 2);
        assert_float_absolute_eq!(tiers[1].value, 400.0);
        assert_eq!(tiers[1].quantity, 3);
    }
}
