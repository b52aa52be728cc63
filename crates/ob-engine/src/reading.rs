//! The result of a consultation.

use ob_core::Symbol;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::nlg::discourse::DiscourseRelation;
use crate::nlg::lint::LintReport;
use crate::seed::fingerprint;

/// Correspondences of one drawn symbol, as shown in the reading's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrespondenceRow {
    /// Symbol id.
    pub id: String,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Primary glyph.
    #[serde(rename = "glifo")]
    pub glyph: String,
    /// Element, or empty.
    #[serde(rename = "elemento")]
    pub element: String,
    /// Ruling body, or empty.
    #[serde(rename = "planeta")]
    pub ruling_body: String,
    /// Quality, or empty.
    #[serde(rename = "qualidade")]
    pub quality: String,
    /// Verb, or empty.
    #[serde(rename = "verbo")]
    pub verb: String,
    /// Shadow, or empty.
    #[serde(rename = "sombra")]
    pub shadow: String,
}

impl From<&Symbol> for CorrespondenceRow {
    fn from(symbol: &Symbol) -> Self {
        let corr = &symbol.correspondences;
        Self {
            id: symbol.id.clone(),
            name: symbol.name.clone(),
            glyph: symbol.glyph.clone(),
            element: corr.element_or_empty().to_string(),
            ruling_body: corr.ruling_body_or_empty().to_string(),
            quality: corr.quality_or_empty().to_string(),
            verb: corr.verb_or_empty().to_string(),
            shadow: corr.shadow_or_empty().to_string(),
        }
    }
}

/// The three-slot correspondence table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrespondenceTable {
    /// Past position.
    #[serde(rename = "passado")]
    pub past: CorrespondenceRow,
    /// Present position.
    #[serde(rename = "presente")]
    pub present: CorrespondenceRow,
    /// Future (trend) position.
    #[serde(rename = "tendencia")]
    pub trend: CorrespondenceRow,
}

impl CorrespondenceTable {
    /// Rows in position order.
    pub fn rows(&self) -> [(&'static str, &CorrespondenceRow); 3] {
        [
            ("passado", &self.past),
            ("presente", &self.present),
            ("tendência", &self.trend),
        ]
    }
}

/// Observable-signal phrases the assembler chose as evidence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedEvidence {
    /// Past evidence.
    pub past: String,
    /// Present evidence.
    pub present: String,
    /// Future evidence.
    pub future: String,
}

/// A finished reading. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingResult {
    /// Entity seal.
    pub seal: String,
    /// Laws and cost of the moment.
    pub liturgy: String,
    /// The argumentative body.
    pub reading: String,
    /// Closing block with act and cost.
    pub coda: String,
    /// Prescribed action.
    pub act: String,
    /// Prescribed renunciation.
    pub cost: String,
    /// Correspondences of the drawn triple.
    pub correspondences: CorrespondenceTable,
    /// Noise line shown when entropy is high.
    pub interference_line: Option<String>,
    /// Rhetorical relation of the reading.
    pub relation: DiscourseRelation,
    /// Extracted topic of the question.
    pub topic: String,
    /// Index of the accepted attempt (0-2).
    pub attempt: u8,
    /// Linter verdict of the accepted attempt.
    pub checks: LintReport,
    /// Evidence phrases chosen per position.
    pub selected_evidence: SelectedEvidence,
}

impl ReadingResult {
    /// Ids of the drawn triple, in position order.
    pub fn symbol_ids(&self) -> [&str; 3] {
        [
            self.correspondences.past.id.as_str(),
            self.correspondences.present.id.as_str(),
            self.correspondences.trend.id.as_str(),
        ]
    }

    /// Stable 16-hex-digit fingerprint of the serialized reading.
    pub fn fingerprint(&self) -> EngineResult<String> {
        Ok(fingerprint(&serde_json::to_vec(self)?))
    }

    /// Seal, liturgy, body, interference, and coda joined for display.
    pub fn full_text(&self) -> String {
        let mut blocks = vec![self.seal.as_str(), self.liturgy.as_str(), self.reading.as_str()];
        if let Some(line) = &self.interference_line {
            blocks.push(line);
        }
        blocks.push(&self.coda);
        blocks.join("\n\n")
    }
}
