use std::path::Path;

use crate::error::Result;
use crate::models::DietPlan;

/// Write the finalized plan as CSV, one row per entry plus a totals
/// row.
pub fn write_plan_csv<P: AsRef<Path>>(plan: &DietPlan, path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "item",
        "tag",
        "quantity",
        "expected_value",
        "expected_price",
        "net",
    ])?;

    for entry in &plan.entries {
        let (value, price) = entry.expected_totals();
        writer.write_record([
            entry.entry.item.name.clone(),
            entry.entry.tag.clone().unwrap_or_default(),
            entry.quantity.to_string(),
            format!("{:.0}", value),
            format!("{:.0}", price),
            format!("{:.0}", value - price),
        ])?;
    }

    writer.write_record([
        "TOTAL".to_string(),
        String::new(),
        plan.total_quantity().to_string(),
        format!("{:.0}", plan.expected_value),
        format!("{:.0}", plan.expected_price),
        format!("{:.0}", plan.net_value()),
    ])?;

    writer.flush()?;
    Ok(())
}
