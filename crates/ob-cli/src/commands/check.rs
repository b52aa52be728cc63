use std::path::Path;

use ob_core::DataSet;

pub fn run(dir: &Path) -> Result<(), String> {
    let data = DataSet::load_dir(dir).map_err(|e| format!("failed to load data: {e}"))?;

    println!("  All checks passed for '{}'.", data.lore.entity.name);
    println!(
        "  {} symbols, {} template categories, {} laws, {} taboos",
        data.deck.len(),
        data.templates.len(),
        data.lore.laws.len(),
        data.lore.taboos.len()
    );

    Ok(())
}
