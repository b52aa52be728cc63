//! Seed derivation.
//!
//! A consultation's seed is the first eight bytes (big-endian) of
//! `SHA-256("v1:{base}:{normalized question}:{counter}:{disambiguator}")`.
//! The scheme tag is part of the hashed input so that a future change of
//! scheme never collides with seeds already written to a register.

use sha2::{Digest, Sha256};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::{EngineError, EngineResult};

/// Version tag of the seed scheme.
pub const SEED_SCHEME: &str = "v1";

/// Normalize a question for seeding and repeat detection: lowercase, trim,
/// strip diacritics, and collapse internal whitespace.
pub fn normalize_question(question: &str) -> String {
    let stripped: String = question
        .to_lowercase()
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derive the seed for a consultation.
///
/// `attempt` selects a retry sub-seed; `None` is the consultation's main seed.
pub fn derive_seed(
    base: &str,
    question: &str,
    counter: u64,
    attempt: Option<u8>,
) -> EngineResult<u64> {
    if base.is_empty() {
        return Err(EngineError::MissingSeedBase);
    }
    let disambiguator = attempt.map(|a| format!("a{a}")).unwrap_or_default();
    let input = format!(
        "{SEED_SCHEME}:{base}:{}:{counter}:{disambiguator}",
        normalize_question(question)
    );
    let digest = Sha256::digest(input.as_bytes());
    Ok(u64::from_be_bytes([
        digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6], digest[7],
    ]))
}

/// Stable 16-hex-digit fingerprint of arbitrary bytes.
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}
