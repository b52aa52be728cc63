//! Error types for the reading engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during a consultation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The session has no base secret to derive seeds from.
    #[error("session seed base is missing")]
    MissingSeedBase,

    /// The question is empty after normalization.
    #[error("empty question")]
    EmptyQuestion,

    /// A reading could not be serialized for fingerprinting.
    #[error("cannot fingerprint reading: {0}")]
    Fingerprint(#[from] serde_json::Error),
}
