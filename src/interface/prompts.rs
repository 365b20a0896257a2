use dialoguer::{Confirm, Select};
use strsim::jaro_winkler;

use crate::env::Environment;
use crate::error::Result;
use crate::models::DietPlan;

/// Yes/no confirmation.
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Resolve a user-typed item name against the catalog: exact match
/// first, then fuzzy candidates the user confirms or selects from.
/// Returns `None` when nothing plausible matched.
pub fn resolve_item_name(input: &str, names: &[String]) -> Result<Option<String>> {
    let wanted = input.trim().to_lowercase();
    if wanted.is_empty() {
        return Ok(None);
    }

    if let Some(exact) = names.iter().find(|n| n.to_lowercase() == wanted) {
        return Ok(Some(exact.clone()));
    }

    let mut candidates: Vec<(&String, f64)> = names
        .iter()
        .map(|n| (n, jaro_winkler(&n.to_lowercase(), &wanted)))
        .filter(|(_, score)| *score > 0.7)
        .collect();
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    if candidates.is_empty() {
        println!("No matching item found for '{}'", input);
        return Ok(None);
    }

    if candidates.len() == 1 {
        let name = candidates[0].0;
        let accepted = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", name))
            .default(true)
            .interact()?;
        return Ok(accepted.then(|| name.clone()));
    }

    let options: Vec<String> = candidates
        .iter()
        .take(5)
        .map(|(n, _)| (*n).clone())
        .collect();
    let mut selection_options = options.clone();
    selection_options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&selection_options)
        .default(0)
        .interact()?;

    Ok(options.get(selection).cloned())
}

/// Warn when a planned helper has no units on hand and let the user
/// back out before any organ capacity is spent.
pub fn confirm_missing_helpers<E: Environment>(plan: &DietPlan, env: &E) -> Result<bool> {
    for entry in &plan.entries {
        for helper in entry.helpers() {
            if env.available_stock(&helper.item.name) == Some(0) {
                let proceed = Confirm::new()
                    .with_prompt(format!(
                        "No {} on hand. Continue anyway?",
                        helper.item.name
                    ))
                    .default(false)
                    .interact()?;
                if !proceed {
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}
