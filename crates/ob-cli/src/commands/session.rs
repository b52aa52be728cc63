use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use super::{Outcome, SessionFiles};
use crate::render;

const HELP: &str = "  Ask any question to receive a reading.
  estado  show entropy, debt and the session echo
  help    show this message
  sair    end the session";

pub fn run(dir: &Path, files: &SessionFiles) -> Result<(), String> {
    let oracle = super::load_oracle(dir)?;
    let mut state = super::load_state(files)?;
    let signature = &oracle.data().lore.entity.signature;

    println!(
        "  {} {}",
        signature.glyph(),
        oracle.data().lore.entity.name.bold()
    );
    if !signature.tagline.is_empty() {
        println!("  {}", signature.tagline.dimmed());
    }
    println!("  Consultations so far: {}", state.consult_count);
    println!("  Type 'help' for commands, 'sair' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "sair" | "quit" | "q" => break,
            "help" | "ajuda" => {
                println!("{HELP}\n");
                continue;
            }
            "estado" => {
                println!(
                    "  entropy {} | debt {} | consultations {} | echo {}\n",
                    state.entropy,
                    state.debt,
                    state.consult_count,
                    state.echo_symbol().unwrap_or("—")
                );
                continue;
            }
            _ => {}
        }

        match super::ask(&oracle, &mut state, input, files) {
            Ok(Outcome::Reading(out)) => render::print_reading(&out),
            Ok(Outcome::Refused {
                response,
                alternative,
                crisis,
            }) => render::print_refusal(&response, &alternative, crisis),
            Err(e) => println!("{}", e.yellow()),
        }
        println!();
    }

    Ok(())
}
