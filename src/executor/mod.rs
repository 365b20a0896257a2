use crate::env::{ConsumeKind, Environment};
use crate::error::{DietError, Result};
use crate::interface::render;
use crate::models::{DietEntry, DietPlan, ItemKind, Organ};

/// Consumes a finalized plan against live organ state, in priority
/// order, verifying progress every round.
///
/// Owns the organ state for the duration of one `consume` call; usage
/// is re-read before every attempt because helpers and acquisitions may
/// have moved it.
pub struct DietExecutor<'a, E: Environment> {
    env: &'a mut E,
}

impl<'a, E: Environment> DietExecutor<'a, E> {
    pub fn new(env: &'a mut E) -> Self {
        Self { env }
    }

    pub fn consume(&mut self, plan: &DietPlan) -> Result<()> {
        if plan.is_empty() {
            return Ok(());
        }

        let mut plan = plan.clone();
        plan.sort_for_consumption();

        let mut last_usage = None;
        while plan.total_quantity() > 0 {
            let usage = self.env.read_organ_state().usage();
            if last_usage == Some(usage) {
                render::display_diet(&plan, "REMAINING");
                return Err(DietError::StalledConsumption {
                    remaining: plan.remaining_summary(),
                    organs: self.env.read_organ_state(),
                });
            }
            last_usage = Some(usage);

            for index in 0..plan.entries.len() {
                let mut entry = plan.entries[index].clone();
                self.consume_entry(&mut entry)?;
                debug_assert!(entry.quantity <= plan.entries[index].quantity);
                plan.entries[index] = entry;
            }
        }

        Ok(())
    }

    /// Units consumable this round: bounded by remaining plan quantity,
    /// organ room, and (for cleaners) current usage so no pool goes
    /// negative.
    fn consumable_count(&self, entry: &DietEntry) -> u32 {
        let organs = self.env.read_organ_state();
        let mut count = entry.quantity;

        let size = entry.entry.unit_size();
        if size > 0 {
            if let Some(organ) = entry.entry.organ() {
                count = count.min(organs.remaining(organ) / size);
            }
        }

        if let ItemKind::Cleaner(effect) = &entry.entry.item.kind {
            for organ in [Organ::Food, Organ::Booze, Organ::Spleen] {
                let per_unit = effect.for_organ(organ);
                if per_unit > 0 {
                    count = count.min(organs.used(organ) / per_unit);
                }
            }
        }

        count
    }

    fn consume_entry(&mut self, entry: &mut DietEntry) -> Result<()> {
        if entry.quantity == 0 {
            return Ok(());
        }

        let mut count = self.consumable_count(entry);

        if let Some(precondition) = &entry.entry.item.precondition {
            if !self.env.ensure_precondition(precondition) {
                // Skipped this round; a permanent failure surfaces as a
                // stall once nothing else makes progress.
                count = 0;
            }
        }
        if count == 0 {
            return Ok(());
        }

        for helper in entry.helpers().to_vec() {
            if !self.env.apply_helper(&helper.item.name) {
                if helper.required {
                    return Err(DietError::HelperFailed {
                        helper: helper.item.name.clone(),
                    });
                }
                println!("Helper {} failed to apply; continuing without it.", helper.item.name);
            }
        }

        let name = entry.entry.item.name.clone();
        match entry.entry.item.kind.clone() {
            ItemKind::EffectGrant { .. } => {
                // One unit, one attempt, regardless of outcome.
                let obtained = self.acquire_main(entry, 1);
                if obtained > 0
                    && !self.env.consume_primitive(ConsumeKind::Use, 1, &name)
                {
                    return Err(DietError::ConsumptionFailure {
                        item: name,
                        quantity: 1,
                    });
                }
                entry.quantity = 0;
                return Ok(());
            }
            ItemKind::RequiresMaterial { material } => {
                let cap = self.env.lookup_price(&material);
                let materials = self.env.acquire(count, &material, cap);
                if materials < count {
                    println!(
                        "Only obtained {} of {} {} needed for {}.",
                        materials, count, material, name
                    );
                }
                count = materials;
            }
            _ => {}
        }
        if count == 0 {
            return Ok(());
        }

        let obtained = self.acquire_main(entry, count);
        if obtained < count {
            println!("Short on {}: obtained {} of {}.", name, obtained, count);
        }
        if obtained == 0 {
            return Ok(());
        }

        let kind = ConsumeKind::for_organ(entry.entry.organ());
        if !self.env.consume_primitive(kind, obtained, &name) {
            return Err(DietError::ConsumptionFailure {
                item: name,
                quantity: obtained,
            });
        }
        entry.quantity -= obtained;
        Ok(())
    }

    /// Acquire up to `count` units, capped at what a unit is expected
    /// to be worth; paying more would destroy value.
    fn acquire_main(&mut self, entry: &DietEntry, count: u32) -> u32 {
        let cap = entry
            .entry
            .tiers
            .first()
            .map(|tier| tier.value)
            .unwrap_or(0.0)
            .max(0.0);
        self.env
            .acquire(count, &entry.entry.item.name, cap)
    }
}
