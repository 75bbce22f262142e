//! Plain-text table rendering for the command loop.
//!
//! ASCII tables only; no colors, no escape codes, so transcripts stay
//! readable in logs and tests.

use zarsian_economy::{Catalog, GameError, InventoryReport};

/// Prints a failure, expanding per-item shortfalls when present.
pub fn failure(error: &GameError) {
    println!("! {error}");
    if let GameError::InsufficientMaterials { shortfalls, .. } = error {
        for shortfall in shortfalls {
            println!("    {shortfall}");
        }
    }
}

/// Prints the inventory table: per-item rows, total, and wallet.
pub fn inventory(report: &InventoryReport) {
    if report.rows.is_empty() {
        println!();
        println!("Inventory is empty!");
        println!();
        return;
    }

    let name_width = report
        .rows
        .iter()
        .map(|row| row.name.len())
        .max()
        .unwrap_or(0)
        .max("Item".len());

    println!();
    println!("+-{:-<name_width$}-+--------+", "");
    println!("| {:<name_width$} | Amount |", "Item");
    println!("+-{:-<name_width$}-+--------+", "");
    for row in &report.rows {
        println!("| {:<name_width$} | {:>5}x |", row.name, row.count);
    }
    println!("+-{:-<name_width$}-+--------+", "");
    println!("| {:<name_width$} | {:>6} |", "Total", report.total);
    println!("+-{:-<name_width$}-+--------+", "");
    println!("Money: {}", report.money);
    println!();
}

/// Prints one recipe with its input and output columns.
pub fn recipe(id: &str, inputs: &[(String, u32)], outputs: &[(String, u32)]) {
    println!();
    println!("Recipe: {id}");
    println!("  Inputs:");
    for (name, quantity) in inputs {
        println!("    {quantity:>4}x {name}");
    }
    println!("  Outputs:");
    for (name, quantity) in outputs {
        println!("    {quantity:>4}x {name}");
    }
    println!();
}

/// Prints the block listing with levels and yields.
pub fn blocks(catalog: &Catalog) {
    println!();
    println!("Minable blocks:");
    for block in catalog.blocks() {
        println!(
            "  {:<12} level {} -> {} ({}-{} per hit, {:.0}% bonus chance)",
            block.id,
            block.mining_level,
            catalog.item_name(&block.drop_item),
            block.drop_rates.min(),
            block.drop_rates.max(),
            block.drop_rates.rate() * 100.0
        );
    }
    println!();
}

/// Prints the tool listing with levels and upgrade costs.
pub fn tools(catalog: &Catalog) {
    println!();
    println!("Tools:");
    for tool in catalog.tools() {
        print!(
            "  {:<14} {} ({}, x{} speed)",
            tool.id, tool.name, tool.mining_level, tool.speed_factor
        );
        if tool.upgrade_costs.is_empty() {
            println!();
        } else {
            let costs: Vec<String> = tool
                .upgrade_costs
                .iter()
                .map(|(item, quantity)| format!("{quantity}x {}", catalog.item_name(item)))
                .collect();
            println!(" - costs {}", costs.join(", "));
        }
    }
    println!();
}

/// Prints the command reference.
pub fn help() {
    println!();
    println!("Commands ('?1' marks an optional value defaulting to 1):");
    println!("  mine <material> <amount|all>?1   Mine a material, e.g. 'mine coal 5'");
    println!("  process <recipe> <amount|all>?1  Run a recipe, e.g. 'process iron_ingot 2'");
    println!("  upgrade <tool>                   Upgrade your pickaxe, e.g. 'upgrade iron_pickaxe'");
    println!("  inventory                        Show your current inventory");
    println!("  status                           Show name, tool, and inventory");
    println!("  recipe search <term>             Search recipe names");
    println!("  recipe show <name>               Show a recipe's inputs and outputs");
    println!("  blocks                           List minable blocks");
    println!("  tools                            List tools and upgrade costs");
    println!("  last                             Repeat the last action command");
    println!("  exit                             Leave the colony");
    println!();
}
