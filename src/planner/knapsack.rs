use crate::models::{CatalogEntry, DietEntry, DietPlan, Organ, OrganState};
use crate::planner::constants::VALUE_EPSILON;

/// Solve the allocation: one bounded knapsack per organ over remaining
/// capacity, organ-free entries selected independently, the whole plan
/// discarded if it would lose value overall.
///
/// Deterministic: comparisons require strict improvement, so ties keep
/// the earlier-declared entry and repeated calls agree.
pub fn plan(menu: &[CatalogEntry], organs: &OrganState) -> DietPlan {
    let mut entries: Vec<DietEntry> = Vec::new();

    for organ in [Organ::Food, Organ::Booze, Organ::Spleen] {
        let group: Vec<&CatalogEntry> = menu
            .iter()
            .filter(|e| e.organ() == Some(organ) && e.unit_size() > 0)
            .collect();
        let capacity = organs.remaining(organ) as usize;
        entries.extend(knapsack_organ(&group, capacity));
    }

    for entry in menu.iter().filter(|e| e.unit_size() == 0) {
        let quantity = best_free_quantity(entry);
        if quantity > 0 {
            entries.push(DietEntry::new(entry.clone(), quantity));
        }
    }

    let plan = DietPlan::new(entries);
    if plan.net_value() < 0.0 {
        DietPlan::empty()
    } else {
        plan
    }
}

/// Bounded knapsack over one organ's entries. Tiers are diminishing, so
/// each entry's units can be pushed in tier order without losing
/// optimality; quantities are recovered by standard backtracking.
fn knapsack_organ(entries: &[&CatalogEntry], capacity: usize) -> Vec<DietEntry> {
    let mut best = vec![0.0f64; capacity + 1];
    let mut choices: Vec<Vec<u32>> = Vec::with_capacity(entries.len());

    for entry in entries {
        let size = entry.unit_size() as usize;
        let max_units = (capacity / size).min(entry.quantity_cap() as usize) as u32;

        // Prefix net values over the first q units.
        let mut prefix = vec![0.0f64; max_units as usize + 1];
        for q in 1..=max_units {
            let marginal = entry
                .unit_marginals(q)
                .map(|(v, p)| v - p)
                .unwrap_or(f64::NEG_INFINITY);
            prefix[q as usize] = prefix[q as usize - 1] + marginal;
        }

        let mut next = best.clone();
        let mut choice = vec![0u32; capacity + 1];
        for used in 0..=capacity {
            for q in 1..=max_units as usize {
                let need = size * q;
                if need > used {
                    break;
                }
                let candidate = best[used - need] + prefix[q];
                if candidate > next[used] + VALUE_EPSILON {
                    next[used] = candidate;
                    choice[used] = q as u32;
                }
            }
        }
        best = next;
        choices.push(choice);
    }

    // Walk the stages backwards to recover per-entry quantities.
    let mut used = capacity;
    let mut quantities = vec![0u32; entries.len()];
    for (index, choice) in choices.iter().enumerate().rev() {
        let q = choice[used];
        if q > 0 {
            quantities[index] = q;
            used -= entries[index].unit_size() as usize * q as usize;
        }
    }

    entries
        .iter()
        .zip(quantities)
        .filter(|(_, q)| *q > 0)
        .map(|(entry, q)| DietEntry::new((*entry).clone(), q))
        .collect()
}

/// Organ-free entries contend for nothing: take every unit whose
/// marginal net value is positive, up to the entry's own cap. Entries
/// with no bounded cap and no explicit limit are skipped rather than
/// selected without bound.
fn best_free_quantity(entry: &CatalogEntry) -> u32 {
    let cap = match entry.item.max_quantity {
        Some(max) => max,
        None => entry
            .tiers
            .iter()
            .filter(|t| t.quantity != u32::MAX)
            .map(|t| t.quantity)
            .max()
            .unwrap_or(0),
    };

    let mut quantity = 0;
    for n in 1..=cap {
        match entry.unit_marginals(n) {
            Some((value, price)) if value - price > 0.0 => quantity = n,
            _ => break,
        }
    }
    quantity
}
