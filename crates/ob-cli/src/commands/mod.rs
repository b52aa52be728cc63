pub mod check;
pub mod consult;
pub mod register;
pub mod seed;
pub mod session;

use std::fs;
use std::path::{Path, PathBuf};

use ob_core::DataSet;
use ob_engine::{Consultation, Oracle, SessionState};

use crate::register::{self as journal, RegisterEntry, StateSnapshot};

/// Optional files a consultation reads from and writes to.
pub struct SessionFiles {
    /// JSON session state, created if missing.
    pub state: Option<PathBuf>,
    /// JSONL register to append to.
    pub log: Option<PathBuf>,
    /// Base secret for a new session.
    pub seed_base: Option<String>,
}

/// What happened to one question.
pub enum Outcome {
    /// The oracle answered.
    Reading(Box<Consultation>),
    /// A taboo answered instead.
    Refused {
        response: String,
        alternative: String,
        crisis: bool,
    },
}

/// Load the data directory and build an oracle over it.
fn load_oracle(dir: &Path) -> Result<Oracle, String> {
    let data = DataSet::load_dir(dir).map_err(|e| format!("failed to load data: {e}"))?;
    Ok(Oracle::new(data))
}

/// Read the session state, or start a new one if there is no state file yet.
fn load_state(files: &SessionFiles) -> Result<SessionState, String> {
    if let Some(path) = files.state.as_deref().filter(|p| p.exists()) {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let state: SessionState = serde_json::from_str(&content)
            .map_err(|e| format!("invalid state file {}: {e}", path.display()))?;
        tracing::debug!(path = %path.display(), consults = state.consult_count, "state loaded");
        return Ok(state);
    }
    Ok(match &files.seed_base {
        Some(base) => SessionState::with_seed_base(base.as_str()),
        None => SessionState::new(),
    })
}

fn save_state(files: &SessionFiles, state: &SessionState) -> Result<(), String> {
    let Some(path) = &files.state else {
        return Ok(());
    };
    let content =
        serde_json::to_string_pretty(state).map_err(|e| format!("cannot encode state: {e}"))?;
    fs::write(path, content).map_err(|e| format!("cannot write {}: {e}", path.display()))
}

/// Run one question through the taboo filter and the oracle, then persist.
fn ask(
    oracle: &Oracle,
    state: &mut SessionState,
    question: &str,
    files: &SessionFiles,
) -> Result<Outcome, String> {
    if let Some(verdict) = oracle.check_taboos(state, question) {
        let crisis = verdict.is_crisis();
        let response = verdict.rule.response.clone();
        let alternative = verdict.rule.alternative.clone();
        let snapshot = StateSnapshot::from(&verdict.state);
        let entry = RegisterEntry::taboo(question, &verdict.rule.id, crisis, snapshot);
        *state = verdict.state;
        if let Some(log) = &files.log {
            journal::append(log, &entry)?;
        }
        save_state(files, state)?;
        return Ok(Outcome::Refused {
            response,
            alternative,
            crisis,
        });
    }

    let out = oracle
        .consult(state, question)
        .map_err(|e| format!("consultation failed: {e}"))?;
    *state = out.state.clone();
    if let Some(log) = &files.log {
        journal::append(log, &RegisterEntry::reading(question, &out))?;
    }
    save_state(files, state)?;
    Ok(Outcome::Reading(Box::new(out)))
}
