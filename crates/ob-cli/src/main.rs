//! CLI frontend for the Observador reading engine.

mod commands;
mod register;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ob",
    about = "Observador: seeded symbolic readings with an act and a cost",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask one question and print the reading
    Consult {
        /// The question
        question: String,

        /// Directory with deck.json, templates.json and lore.json
        #[arg(short, long, default_value = "data")]
        dir: PathBuf,

        /// Session state file (created if missing)
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Append the reading to this JSONL register
        #[arg(short, long)]
        log: Option<PathBuf>,

        /// Session base secret for a new session (default: random)
        #[arg(long)]
        seed_base: Option<String>,

        /// Print the reading as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session
    Session {
        /// Directory with deck.json, templates.json and lore.json
        #[arg(short, long, default_value = "data")]
        dir: PathBuf,

        /// Session state file (created if missing)
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Append readings to this JSONL register
        #[arg(short, long)]
        log: Option<PathBuf>,

        /// Session base secret for a new session (default: random)
        #[arg(long)]
        seed_base: Option<String>,
    },

    /// Show the most recent readings of a register
    Register {
        /// JSONL register file
        log: PathBuf,

        /// How many records to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Print the seed derived for a session base, question and counter
    Seed {
        /// Session base secret
        base: String,

        /// The question
        question: String,

        /// Consultation counter
        counter: u64,

        /// Retry attempt (0-2) for a sub-seed
        #[arg(short, long)]
        attempt: Option<u8>,
    },

    /// Load and validate the data documents
    Check {
        /// Directory with deck.json, templates.json and lore.json
        #[arg(short, long, default_value = "data")]
        dir: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Consult {
            question,
            dir,
            state,
            log,
            seed_base,
            json,
        } => commands::consult::run(
            &dir,
            &question,
            &commands::SessionFiles {
                state,
                log,
                seed_base,
            },
            json,
        ),
        Commands::Session {
            dir,
            state,
            log,
            seed_base,
        } => commands::session::run(
            &dir,
            &commands::SessionFiles {
                state,
                log,
                seed_base,
            },
        ),
        Commands::Register { log, limit } => commands::register::run(&log, limit),
        Commands::Seed {
            base,
            question,
            counter,
            attempt,
        } => commands::seed::run(&base, &question, counter, attempt),
        Commands::Check { dir } => commands::check::run(&dir),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
