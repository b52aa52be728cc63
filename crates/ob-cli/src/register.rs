//! Append-only JSONL register of consultations.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ob_engine::{Consultation, LintReport, SelectedEvidence, SessionState};

/// Drift counters at the time of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Interference drift.
    pub entropy: u32,
    /// Debt drift.
    pub debt: u32,
    /// Accepted consultations so far.
    pub consult_count: u64,
}

impl From<&SessionState> for StateSnapshot {
    fn from(state: &SessionState) -> Self {
        Self {
            entropy: state.entropy,
            debt: state.debt,
            consult_count: state.consult_count,
        }
    }
}

/// One line of the register.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegisterEntry {
    /// An accepted consultation.
    Reading {
        timestamp: DateTime<Utc>,
        question: String,
        seed: u64,
        symbols: Vec<String>,
        state: StateSnapshot,
        seal: String,
        liturgy: String,
        reading: String,
        coda: String,
        act: String,
        cost: String,
        relation: String,
        topic: String,
        attempt: u8,
        checks: LintReport,
        selected_evidence: SelectedEvidence,
        interference_line: Option<String>,
    },
    /// A question refused by a taboo.
    Taboo {
        timestamp: DateTime<Utc>,
        question: String,
        taboo: String,
        crisis: bool,
        state: StateSnapshot,
    },
}

impl RegisterEntry {
    /// Entry for an accepted consultation.
    pub fn reading(question: &str, out: &Consultation) -> Self {
        let r = &out.reading;
        Self::Reading {
            timestamp: Utc::now(),
            question: question.to_string(),
            seed: out.seed,
            symbols: r.symbol_ids().iter().map(|s| s.to_string()).collect(),
            state: StateSnapshot::from(&out.state),
            seal: r.seal.clone(),
            liturgy: r.liturgy.clone(),
            reading: r.reading.clone(),
            coda: r.coda.clone(),
            act: r.act.clone(),
            cost: r.cost.clone(),
            relation: r.relation.to_string(),
            topic: r.topic.clone(),
            attempt: r.attempt,
            checks: r.checks.clone(),
            selected_evidence: r.selected_evidence.clone(),
            interference_line: r.interference_line.clone(),
        }
    }

    /// Entry for a refused question.
    pub fn taboo(question: &str, taboo: &str, crisis: bool, state: StateSnapshot) -> Self {
        Self::Taboo {
            timestamp: Utc::now(),
            question: question.to_string(),
            taboo: taboo.to_string(),
            crisis,
            state,
        }
    }

    /// When the entry was written.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Reading { timestamp, .. } | Self::Taboo { timestamp, .. } => *timestamp,
        }
    }

    /// The question asked.
    pub fn question(&self) -> &str {
        match self {
            Self::Reading { question, .. } | Self::Taboo { question, .. } => question,
        }
    }
}

/// Append one entry as a JSON line.
pub fn append(path: &Path, entry: &RegisterEntry) -> Result<(), String> {
    let line = serde_json::to_string(entry).map_err(|e| format!("cannot encode entry: {e}"))?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("cannot open {}: {e}", path.display()))?;
    writeln!(file, "{line}").map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), "register entry appended");
    Ok(())
}

/// Read every entry. Blank lines are skipped; a malformed line is an error.
pub fn read(path: &Path) -> Result<Vec<RegisterEntry>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map_err(|e| format!("{}:{}: invalid entry: {e}", path.display(), i + 1))
        })
        .collect()
}
