//! Rhetorical relation between the three positions of a draw.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::draw::Draw;
use crate::rng::SeededRng;

/// Polarity gap past→present below which the draw reads as a cause.
pub const CAUSE_GAP_PAST: f64 = 0.2;
/// Polarity gap present→future below which the draw reads as a cause.
pub const CAUSE_GAP_FUTURE: f64 = 0.3;
/// Polarity gap past→present above which the draw reads as a contrast.
pub const CONTRAST_GAP_PAST: f64 = 0.4;
/// Polarity gap present→future above which the draw reads as a contrast.
pub const CONTRAST_GAP_FUTURE: f64 = 0.5;

/// The rhetorical relation chosen once per reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscourseRelation {
    /// The past produced the present.
    Cause,
    /// The future depends on what the present does.
    Condition,
    /// The positions pull against each other.
    Contrast,
    /// The positions restate one theme.
    Elaboration,
}

impl DiscourseRelation {
    /// Every relation, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Cause,
        Self::Condition,
        Self::Contrast,
        Self::Elaboration,
    ];

    /// Template-bank key of this relation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cause => "CAUSE",
            Self::Condition => "CONDITION",
            Self::Contrast => "CONTRAST",
            Self::Elaboration => "ELABORATION",
        }
    }

    /// Candidate connectives for the warrant line.
    pub fn connectors(self) -> &'static [&'static str] {
        match self {
            Self::Cause => &["porque", "logo", "por isso"],
            Self::Condition => &["se", "quando", "caso"],
            Self::Contrast => &["no entanto", "mas", "contudo"],
            Self::Elaboration => &["assim", "dessa forma", "portanto"],
        }
    }
}

impl fmt::Display for DiscourseRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the relation for a draw. The first matching rule wins:
///
/// 1. a domain shared by all three symbols → elaboration;
/// 2. both polarity gaps small → cause;
/// 3. either polarity gap large → contrast;
/// 4. present has a verb and future has a quality → condition;
/// 5. otherwise a uniform pick from `rng`.
pub fn select_relation(draw: &Draw<'_>, rng: &mut SeededRng) -> DiscourseRelation {
    let (past, present, future) = (draw.past, draw.present, draw.future);

    let shared = past
        .domains
        .iter()
        .any(|d| present.has_domain(d) && future.has_domain(d));
    if shared {
        return DiscourseRelation::Elaboration;
    }

    let gap_past = (past.polarity - present.polarity).abs();
    let gap_future = (present.polarity - future.polarity).abs();

    if gap_past < CAUSE_GAP_PAST && gap_future < CAUSE_GAP_FUTURE {
        return DiscourseRelation::Cause;
    }
    if gap_past > CONTRAST_GAP_PAST || gap_future > CONTRAST_GAP_FUTURE {
        return DiscourseRelation::Contrast;
    }
    if present.correspondences.has_verb() && future.correspondences.has_quality() {
        return DiscourseRelation::Condition;
    }

    rng.choose(&DiscourseRelation::ALL)
        .copied()
        .unwrap_or(DiscourseRelation::Condition)
}
