//! Structural linter for an assembled reading.
//!
//! The linter checks form only: markers, counts, and deadline tokens. It
//! says nothing about whether a reading is any good.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Evidence-marked lines a reading needs.
pub const MIN_EVIDENCE_LINES: usize = 2;

const WARRANT_MARKERS: &[&str] = &["por isso", "logo", "se", "caso", "no entanto", "regra:"];
const QUALIFIER_MARKERS: &[&str] = &["provável", "possível", "se ", "caso", "quando"];
const LIMIT_MARKERS: &[&str] = &["limite:", "não confunda", "isto falha quando", "exceção"];
const CRITERION_VERBS: &[&str] = &[
    "anote",
    "escreva",
    "liste",
    "observe",
    "documente",
    "registre",
    "identifique",
];
const ABSTRACT_TERMS: &[&str] = &["moral", "espiritual", "abstrato"];

/// One item of the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// The reading states a thesis.
    HasThesis,
    /// At least two evidence lines.
    EvidenceCountOk,
    /// A warrant or connective is present.
    HasWarrant,
    /// An epistemic qualifier is present.
    HasQualifier,
    /// A limiter is present.
    HasLimit,
    /// Both "se" and "então" appear.
    HasCondition,
    /// The act names a deadline.
    ActHasDeadline,
    /// The act names a verifiable step.
    ActHasCriterion,
    /// The cost names a deadline.
    CostHasDeadline,
    /// The cost is a concrete renunciation.
    CostIsConcrete,
}

impl Criterion {
    /// Every criterion, in checklist order.
    pub const ALL: [Self; 10] = [
        Self::HasThesis,
        Self::EvidenceCountOk,
        Self::HasWarrant,
        Self::HasQualifier,
        Self::HasLimit,
        Self::HasCondition,
        Self::ActHasDeadline,
        Self::ActHasCriterion,
        Self::CostHasDeadline,
        Self::CostIsConcrete,
    ];

    /// Snake-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HasThesis => "has_thesis",
            Self::EvidenceCountOk => "evidence_count_ok",
            Self::HasWarrant => "has_warrant",
            Self::HasQualifier => "has_qualifier",
            Self::HasLimit => "has_limit",
            Self::HasCondition => "has_condition",
            Self::ActHasDeadline => "act_has_deadline",
            Self::ActHasCriterion => "act_has_criterion",
            Self::CostHasDeadline => "cost_has_deadline",
            Self::CostIsConcrete => "cost_is_concrete",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict of one lint pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    /// Result per criterion.
    pub checks: BTreeMap<Criterion, bool>,
    /// Number of evidence-marked lines found.
    pub evidence_count: usize,
}

impl LintReport {
    /// Whether every criterion holds.
    pub fn passed(&self) -> bool {
        Criterion::ALL.iter().all(|c| self.holds(*c))
    }

    /// Whether one criterion holds.
    pub fn holds(&self, criterion: Criterion) -> bool {
        self.checks.get(&criterion).copied().unwrap_or(false)
    }

    /// Failing criteria, in checklist order.
    pub fn violations(&self) -> Vec<Criterion> {
        Criterion::ALL
            .into_iter()
            .filter(|c| !self.holds(*c))
            .collect()
    }
}

fn deadline_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)\b(hoje|24h|48h|\d+\s*dias?)\b").ok())
        .as_ref()
}

/// Whether the text names a deadline: `hoje`, `24h`, `48h`, or `<N> dia(s)`.
pub fn has_deadline(text: &str) -> bool {
    deadline_pattern().is_some_and(|p| p.is_match(text))
}

fn is_evidence_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("evidência:")
        || lower.contains("observe:")
        || line.trim().starts_with("Evidência")
}

/// Lint a reading body with its act and cost.
pub fn lint(reading: &str, act: &str, cost: &str) -> LintReport {
    let text = reading.to_lowercase();
    let act_lower = act.to_lowercase();
    let cost_lower = cost.to_lowercase();
    let evidence_count = reading.lines().filter(|l| is_evidence_line(l)).count();

    let any = |haystack: &str, needles: &[&str]| needles.iter().any(|n| haystack.contains(n));

    let checks = BTreeMap::from([
        (Criterion::HasThesis, text.contains("tese:")),
        (Criterion::EvidenceCountOk, evidence_count >= MIN_EVIDENCE_LINES),
        (Criterion::HasWarrant, any(&text, WARRANT_MARKERS)),
        (Criterion::HasQualifier, any(&text, QUALIFIER_MARKERS)),
        (Criterion::HasLimit, any(&text, LIMIT_MARKERS)),
        (
            Criterion::HasCondition,
            text.contains("se") && text.contains("então"),
        ),
        (Criterion::ActHasDeadline, has_deadline(act)),
        (Criterion::ActHasCriterion, any(&act_lower, CRITERION_VERBS)),
        (Criterion::CostHasDeadline, has_deadline(cost)),
        (
            Criterion::CostIsConcrete,
            !any(&cost_lower, ABSTRACT_TERMS)
                && (cost_lower.contains("renuncie") || cost_lower.contains("não")),
        ),
    ]);

    LintReport {
        checks,
        evidence_count,
    }
}
