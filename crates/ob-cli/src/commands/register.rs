use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use crate::register::{self as journal, RegisterEntry};

pub fn run(log: &Path, limit: usize) -> Result<(), String> {
    let entries = journal::read(log)?;

    if entries.is_empty() {
        println!("  No readings recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["When", "Question", "Symbols", "Relation", "Entropy", "Debt"]);

    let skip = entries.len().saturating_sub(limit);
    for entry in &entries[skip..] {
        let when = entry.timestamp().format("%Y-%m-%d %H:%M").to_string();
        let question = if entry.question().chars().count() > 40 {
            let short: String = entry.question().chars().take(37).collect();
            format!("{short}...")
        } else {
            entry.question().to_string()
        };
        let row = match entry {
            RegisterEntry::Reading {
                symbols,
                relation,
                state,
                ..
            } => vec![
                when,
                question,
                symbols.join(" "),
                relation.clone(),
                state.entropy.to_string(),
                state.debt.to_string(),
            ],
            RegisterEntry::Taboo { taboo, state, .. } => vec![
                when,
                question,
                format!("taboo {taboo}"),
                "—".to_string(),
                state.entropy.to_string(),
                state.debt.to_string(),
            ],
        };
        table.add_row(row);
    }

    println!("{table}");
    println!();
    println!("  {} of {} entries", entries.len() - skip, entries.len());

    Ok(())
}
