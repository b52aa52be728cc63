//! Terminal and JSON rendering of readings.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use ob_engine::{Consultation, CorrespondenceTable, ReadingResult};

use crate::register::StateSnapshot;

#[derive(Serialize)]
struct JsonReading<'a> {
    seed: u64,
    state: StateSnapshot,
    #[serde(flatten)]
    reading: &'a ReadingResult,
}

/// The consultation as pretty-printed JSON.
pub fn json(out: &Consultation) -> Result<String, String> {
    let doc = JsonReading {
        seed: out.seed,
        state: StateSnapshot::from(&out.state),
        reading: &out.reading,
    };
    serde_json::to_string_pretty(&doc).map_err(|e| format!("cannot encode reading: {e}"))
}

/// Correspondence table of the drawn triple.
pub fn correspondence_table(table: &CorrespondenceTable) -> Table {
    let mut out = Table::new();
    out.set_content_arrangement(ContentArrangement::Dynamic);
    out.set_header(vec![
        "Position", "Symbol", "Element", "Planet", "Quality", "Verb", "Shadow",
    ]);
    for (position, row) in table.rows() {
        out.add_row(vec![
            position.to_string(),
            format!("{} {}", row.glyph, row.name),
            row.element.clone(),
            row.ruling_body.clone(),
            row.quality.clone(),
            row.verb.clone(),
            row.shadow.clone(),
        ]);
    }
    out
}

/// Print a consultation to stdout.
pub fn print_reading(out: &Consultation) {
    let r = &out.reading;
    println!("  {}", r.seal.bold());
    println!("  {}", r.liturgy.dimmed());
    println!();
    for line in r.reading.lines() {
        println!("  {line}");
    }
    if let Some(line) = &r.interference_line {
        println!();
        println!("  {}", line.magenta());
    }
    println!();
    println!("  {} {}", "Ato:".green().bold(), r.act);
    println!("  {} {}", "Custo:".red().bold(), r.cost);
    println!();
    println!("{}", correspondence_table(&r.correspondences));
    println!();
    println!("  {}", r.coda.italic());
    println!(
        "  {}",
        format!(
            "relation {} | topic {} | attempt {} | entropy {} | debt {}",
            r.relation, r.topic, r.attempt, out.state.entropy, out.state.debt
        )
        .dimmed()
    );
    let violations = r.checks.violations();
    if !violations.is_empty() {
        let names: Vec<&str> = violations.iter().map(|c| c.as_str()).collect();
        println!(
            "  {}",
            format!("lint: {} failed", names.join(", ")).yellow()
        );
    }
}

/// Print a taboo refusal, with the question worth asking instead.
pub fn print_refusal(response: &str, alternative: &str, crisis: bool) {
    if crisis {
        println!("  {}", response.bold());
    } else {
        println!("  {}", response.yellow());
    }
    if !alternative.is_empty() {
        println!("  {} {alternative}", "Pergunte antes:".dimmed());
    }
}
