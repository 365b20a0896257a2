use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::env::SimState;
use crate::error::{DietError, Result};
use crate::models::Item;

/// Load the item catalog from a JSON file.
///
/// Deduplicates by lowercase name (last occurrence wins) and rejects
/// entries that violate the size/organ invariant.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Item>> {
    let content = fs::read_to_string(path)?;
    let items: Vec<Item> = serde_json::from_str(&content)?;

    let mut seen: HashMap<String, Item> = HashMap::new();
    for item in items {
        if !item.is_valid() {
            return Err(DietError::InvalidInput(format!(
                "{} consumes capacity but names no organ (or has negative stats)",
                item.name
            )));
        }
        seen.insert(item.key(), item);
    }

    Ok(seen.into_values().collect())
}

/// Load the simulated environment state from a JSON file.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<SimState> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save the simulated environment state back to disk.
pub fn save_state<P: AsRef<Path>>(path: P, state: &SimState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}
