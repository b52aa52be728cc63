//! Per-session drift and memory.
//!
//! Entropy and debt (0-100) record how the asker has been treating the
//! oracle: repeated questions and demands for certainty raise them, and
//! they in turn perturb the surface text of later readings. Motif and
//! domain memory record what has been drawn so far.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::seed::normalize_question;

/// Upper bound of the drift counters.
pub const DRIFT_MAX: u32 = 100;

/// Motif count at which a symbol can become the session echo.
pub const ECHO_MIN_COUNT: u32 = 2;

/// Mutable state of one session, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Stable secret every seed of this session derives from.
    pub seed_base: String,
    /// Interference drift, 0-100.
    pub entropy: u32,
    /// Debt drift, 0-100.
    pub debt: u32,
    /// Accepted consultations so far.
    pub consult_count: u64,
    /// Recent normalized questions, oldest first.
    pub recent_questions: VecDeque<String>,
    /// Symbol id → number of times drawn.
    pub motif_counts: BTreeMap<String, u32>,
    /// Domain tag → number of times drawn.
    pub domain_counts: BTreeMap<String, u32>,
    /// Symbol ids of the last draw (past, present, future).
    pub last_draw: Vec<String>,
    /// Fingerprint of the last produced reading.
    pub last_reading_fingerprint: String,
}

impl SessionState {
    /// A fresh session with a random base secret.
    pub fn new() -> Self {
        Self::with_seed_base(Uuid::new_v4().simple().to_string())
    }

    /// A fresh session with a caller-supplied base secret.
    pub fn with_seed_base(seed_base: impl Into<String>) -> Self {
        Self {
            seed_base: seed_base.into(),
            entropy: 0,
            debt: 0,
            consult_count: 0,
            recent_questions: VecDeque::new(),
            motif_counts: BTreeMap::new(),
            domain_counts: BTreeMap::new(),
            last_draw: Vec::new(),
            last_reading_fingerprint: String::new(),
        }
    }

    /// Whether the normalized question is already in the recent history.
    pub fn is_repeat_question(&self, question: &str) -> bool {
        let normalized = normalize_question(question);
        self.recent_questions.iter().any(|q| *q == normalized)
    }

    /// Remember a question, evicting the oldest beyond `limit`.
    pub fn record_question(&mut self, question: &str, limit: usize) {
        self.recent_questions.push_back(normalize_question(question));
        while self.recent_questions.len() > limit {
            self.recent_questions.pop_front();
        }
    }

    /// Asking the same thing again: +15 entropy, +10 debt.
    pub fn apply_repeat_penalty(&mut self) {
        self.entropy = (self.entropy + 15).min(DRIFT_MAX);
        self.debt = (self.debt + 10).min(DRIFT_MAX);
    }

    /// Demanding certainty: +20 debt.
    pub fn apply_certainty_penalty(&mut self) {
        self.debt = (self.debt + 20).min(DRIFT_MAX);
    }

    /// Touching a taboo: add the deltas, clamped to 0-100.
    pub fn apply_taboo_penalty(&mut self, debt_delta: i32, entropy_delta: i32) {
        self.debt = shift(self.debt, debt_delta);
        self.entropy = shift(self.entropy, entropy_delta);
    }

    /// Count drawn symbols and their domains.
    pub fn update_memory<'a>(
        &mut self,
        symbol_ids: impl IntoIterator<Item = &'a str>,
        domains: impl IntoIterator<Item = &'a str>,
    ) {
        for id in symbol_ids {
            *self.motif_counts.entry(id.to_string()).or_insert(0) += 1;
        }
        for domain in domains {
            *self.domain_counts.entry(domain.to_string()).or_insert(0) += 1;
        }
    }

    /// Times a symbol has been drawn this session.
    pub fn motif_count(&self, symbol_id: &str) -> u32 {
        self.motif_counts.get(symbol_id).copied().unwrap_or(0)
    }

    /// The session echo: the most-drawn symbol once some count reaches 2.
    /// Ties go to the lowest symbol id.
    pub fn echo_symbol(&self) -> Option<&str> {
        let max = self.motif_counts.values().copied().max()?;
        if max < ECHO_MIN_COUNT {
            return None;
        }
        self.motif_counts
            .iter()
            .find(|(_, count)| **count == max)
            .map(|(id, _)| id.as_str())
    }

    /// The past symbol of the previous draw, if any.
    pub fn last_past_symbol(&self) -> Option<&str> {
        self.last_draw.first().map(String::as_str)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

fn shift(value: u32, delta: i32) -> u32 {
    (i64::from(value) + i64::from(delta)).clamp(0, i64::from(DRIFT_MAX)) as u32
}
