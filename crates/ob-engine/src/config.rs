//! Configuration for the reading engine.

use ob_core::Lore;

/// Upper bound on assembler+linter cycles per consultation.
pub const MAX_ATTEMPTS: u8 = 3;

/// Configuration for an [`Oracle`](crate::Oracle).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Assembler+linter cycles per consultation (1-3).
    pub max_attempts: u8,
    /// How many normalized questions the session remembers.
    pub history_len: usize,
    /// Entropy above which interference markers appear.
    pub interference_threshold: u32,
    /// Debt above which debt-flavored text appears.
    pub debt_threshold: u32,
    /// Phrases that demand certainty and add debt.
    pub certainty_markers: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            history_len: 5,
            interference_threshold: 60,
            debt_threshold: 50,
            certainty_markers: vec!["sim ou não".to_string(), "certeza".to_string()],
        }
    }
}

impl EngineConfig {
    /// Defaults with the drift thresholds taken from the lore's effects.
    pub fn from_lore(lore: &Lore) -> Self {
        Self {
            interference_threshold: lore.effects.interference_threshold,
            debt_threshold: lore.effects.debt_threshold,
            ..Self::default()
        }
    }

    /// Set the attempt bound (clamped to 1-3).
    pub fn with_max_attempts(mut self, attempts: u8) -> Self {
        self.max_attempts = attempts.clamp(1, MAX_ATTEMPTS);
        self
    }

    /// Set the entropy threshold.
    pub fn with_interference_threshold(mut self, threshold: u32) -> Self {
        self.interference_threshold = threshold;
        self
    }

    /// Set the debt threshold.
    pub fn with_debt_threshold(mut self, threshold: u32) -> Self {
        self.debt_threshold = threshold;
        self
    }

    /// Whether the question asks for certainty.
    pub fn demands_certainty(&self, question: &str) -> bool {
        let lower = question.to_lowercase();
        self.certainty_markers.iter().any(|m| lower.contains(m.as_str()))
    }
}
