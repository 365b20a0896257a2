use crate::models::{CatalogEntry, DietPlan};

/// Print a finalized plan: one line per entry plus aggregate expected
/// value, cost, and net figures.
pub fn display_diet(plan: &DietPlan, name: &str) {
    println!("===== {} DIET =====", name);
    if plan.is_empty() {
        println!("(empty plan — nothing worth consuming)");
        return;
    }

    for entry in &plan.entries {
        if entry.quantity == 0 {
            continue;
        }
        let (value, price) = entry.expected_totals();

        let mut label = entry.entry.item.name.clone();
        if let Some(tag) = &entry.entry.tag {
            label.push_str(&format!(" ({})", tag));
        }

        let helpers = if entry.helpers().is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = entry
                .helpers()
                .iter()
                .map(|h| h.item.name.as_str())
                .collect();
            format!("  helpers: {}", names.join(", "))
        };

        println!(
            "{:>3} x {:<30}{} value: {:.0} price: {:.0} net: {:.0}",
            entry.quantity,
            label,
            helpers,
            value,
            price,
            value - price
        );
    }

    println!();
    println!("--- Summary ---");
    println!("Total value: {:.0}", plan.expected_value);
    println!("Total price: {:.0}", plan.expected_price);
    println!("Net value:   {:.0}", plan.net_value());
    println!("Expected turns gained: {:.1}", plan.expected_turns());
    println!();
}

/// Debug listing of a built menu.
pub fn display_menu(menu: &[CatalogEntry], title: &str) {
    if menu.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!("=== {} ({} entries) ===", title, menu.len());
    for entry in menu {
        let organ = entry
            .organ()
            .map(|o| format!("{:?}", o).to_lowercase())
            .unwrap_or_else(|| "free".to_string());
        println!(
            "  {} [{}] size {} best net {:.0}",
            entry.item.name,
            organ,
            entry.unit_size(),
            entry.best_net()
        );
    }
    println!();
}
