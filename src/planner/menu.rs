use std::collections::{HashMap, HashSet};

use crate::env::Environment;
use crate::error::{DietError, Result};
use crate::models::{CatalogEntry, HelperEntry, Item, ItemKind};
use crate::planner::value::{self, EncounterSlots, ValueContext};

/// Assemble the allocatable menu for one planning attempt: collapse
/// variant groups to the cheapest member, compute value curves, attach
/// helper chains, and drop entries that cannot pay for themselves.
///
/// Cheap and pure apart from price lookups; rebuilt fresh on every
/// convergence iteration.
pub fn build_menu<E: Environment>(
    items: &[Item],
    ctx: &ValueContext,
    slots: &EncounterSlots,
    env: &E,
) -> Result<Vec<CatalogEntry>> {
    let by_key: HashMap<String, &Item> = items.iter().map(|i| (i.key(), i)).collect();

    let mut menu = Vec::new();
    let mut groups_done: HashSet<&str> = HashSet::new();

    for item in items {
        if item.kind == ItemKind::Helper {
            continue;
        }

        // Cosmetic variants: only the cheapest member enters, at the
        // first group member's position.
        let item = match &item.variant_group {
            Some(group) => {
                if !groups_done.insert(group.as_str()) {
                    continue;
                }
                cheapest_variant(items, group, env).unwrap_or(item)
            }
            None => item,
        };

        let mut entry = CatalogEntry::new(item.clone(), value::compute_tiers(item, slots, ctx));
        entry.tag = item.variant_group.clone();

        attach_helpers(&mut entry, &by_key, env)?;

        // Stock-limited items never plan beyond what is on hand.
        if let Some(stock) = env.available_stock(&item.name) {
            let cap = entry.item.max_quantity.map_or(stock, |m| m.min(stock));
            entry.item.max_quantity = Some(cap);
            if cap == 0 {
                continue;
            }
        }

        if entry.best_net() > 0.0 {
            menu.push(entry);
        }
    }

    Ok(menu)
}

fn cheapest_variant<'a, E: Environment>(
    items: &'a [Item],
    group: &str,
    env: &E,
) -> Option<&'a Item> {
    items
        .iter()
        .filter(|i| i.variant_group.as_deref() == Some(group))
        .min_by(|a, b| {
            env.lookup_price(&a.name)
                .partial_cmp(&env.lookup_price(&b.name))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Resolve helper references and fold their unit prices into the main
/// entry's curve; a helper has no capacity cost of its own.
fn attach_helpers(
    entry: &mut CatalogEntry,
    by_key: &HashMap<String, &Item>,
    env: &impl Environment,
) -> Result<()> {
    let refs = entry.item.helpers.clone();
    for helper_ref in refs {
        let helper = by_key
            .get(&helper_ref.name.to_lowercase())
            .copied()
            .ok_or_else(|| DietError::ItemNotFound(helper_ref.name.clone()))?;

        let unit_price = {
            let quoted = env.lookup_price(&helper.name);
            if quoted > 0.0 { quoted } else { helper.price }
        };
        for tier in &mut entry.tiers {
            tier.price += unit_price;
        }
        entry.helpers.push(HelperEntry {
            item: helper.clone(),
            required: helper_ref.required,
        });
    }
    Ok(())
}
