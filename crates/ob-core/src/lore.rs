use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// The world-flavor document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lore {
    /// The speaking entity.
    pub entity: LoreEntity,
    /// Laws; the first three identifiers are shown in the liturgy.
    #[serde(default)]
    pub laws: Vec<Law>,
    /// Drift effect settings.
    #[serde(default)]
    pub effects: Effects,
    /// Forbidden question patterns, matched before a consultation.
    #[serde(default)]
    pub taboos: Vec<TabooRule>,
}

/// Name and signature of the speaking entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreEntity {
    /// Display name.
    pub name: String,
    /// Seal glyph and tagline.
    #[serde(default)]
    pub signature: Signature,
}

impl Default for LoreEntity {
    fn default() -> Self {
        Self {
            name: "OBSERVADOR".to_string(),
            signature: Signature::default(),
        }
    }
}

/// The entity's seal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Primary seal glyph.
    #[serde(default)]
    pub seal_glyph: Option<String>,
    /// ASCII fallback seal.
    #[serde(default)]
    pub seal_fallback: Option<String>,
    /// One-line tagline.
    #[serde(default)]
    pub tagline: String,
}

impl Signature {
    /// The seal glyph, else the fallback, else `<S>`.
    pub fn glyph(&self) -> &str {
        self.seal_glyph
            .as_deref()
            .or(self.seal_fallback.as_deref())
            .unwrap_or("<S>")
    }
}

/// A law of the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Law {
    /// Short identifier, e.g. "L1".
    pub id: String,
    /// Law text.
    #[serde(default)]
    pub text: String,
}

/// Thresholds and glyphs for drift effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    /// Entropy above which interference markers appear.
    #[serde(default = "default_interference_threshold")]
    pub interference_threshold: u32,
    /// Debt above which debt-flavored text appears.
    #[serde(default = "default_debt_threshold")]
    pub debt_threshold: u32,
    /// Marker glyphs interleaved into interfered text.
    #[serde(default = "default_interference_markers")]
    pub interference_markers: Vec<String>,
}

fn default_interference_threshold() -> u32 {
    60
}

fn default_debt_threshold() -> u32 {
    50
}

fn default_interference_markers() -> Vec<String> {
    vec!["░".to_string(), "▒".to_string(), "▓".to_string()]
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            interference_threshold: default_interference_threshold(),
            debt_threshold: default_debt_threshold(),
            interference_markers: default_interference_markers(),
        }
    }
}

/// A forbidden question pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabooRule {
    /// Identifier, e.g. "T1".
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Keywords; any one contained in the question triggers the taboo.
    #[serde(default)]
    pub triggers: Vec<String>,
    /// What the entity answers instead of a reading.
    #[serde(default)]
    pub response: String,
    /// Debt added when triggered.
    #[serde(default)]
    pub debt_delta: i32,
    /// Entropy added when triggered.
    #[serde(default)]
    pub entropy_delta: i32,
    /// Suggested alternative for the asker.
    #[serde(default)]
    pub alternative: String,
    /// Crisis taboos short-circuit without any penalty.
    #[serde(default)]
    pub crisis: bool,
}

impl Lore {
    /// Parse the lore document.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|source| CoreError::Parse {
            document: "lore",
            source,
        })
    }

    /// Identifiers of the first three laws, comma separated.
    pub fn applicable_laws(&self) -> String {
        self.laws
            .iter()
            .take(3)
            .map(|l| l.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
