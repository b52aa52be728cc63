use serde::{Deserialize, Serialize};

/// Symbolic correspondences of a symbol. Every key is optional in the
/// catalog; callers choose their own fallback at the use-site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Correspondences {
    /// Classical element (e.g. "fogo", "agua").
    #[serde(rename = "elemento", default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Ruling celestial body.
    #[serde(rename = "planeta", default, skip_serializing_if = "Option::is_none")]
    pub ruling_body: Option<String>,
    /// The virtue the symbol stands for.
    #[serde(rename = "qualidade", default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// The action the symbol asks for.
    #[serde(rename = "verbo", default, skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    /// The failure mode of the symbol's virtue.
    #[serde(rename = "sombra", default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
}

impl Correspondences {
    /// Element, or `""` when absent.
    pub fn element_or_empty(&self) -> &str {
        self.element.as_deref().unwrap_or("")
    }

    /// Ruling body, or `""` when absent.
    pub fn ruling_body_or_empty(&self) -> &str {
        self.ruling_body.as_deref().unwrap_or("")
    }

    /// Quality, or `""` when absent.
    pub fn quality_or_empty(&self) -> &str {
        self.quality.as_deref().unwrap_or("")
    }

    /// Verb, or `""` when absent.
    pub fn verb_or_empty(&self) -> &str {
        self.verb.as_deref().unwrap_or("")
    }

    /// Shadow, or `""` when absent.
    pub fn shadow_or_empty(&self) -> &str {
        self.shadow.as_deref().unwrap_or("")
    }

    /// Whether a verb is present and non-empty.
    pub fn has_verb(&self) -> bool {
        self.verb.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Whether a quality is present and non-empty.
    pub fn has_quality(&self) -> bool {
        self.quality.as_deref().is_some_and(|q| !q.is_empty())
    }
}

/// A minimal, time-boxed intervention attached to a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    /// Imperative action phrase.
    #[serde(rename = "acao", default = "default_action")]
    pub action: String,
    /// Deadline in hours.
    #[serde(rename = "prazo_horas", default = "default_deadline_hours")]
    pub deadline_hours: u32,
}

fn default_action() -> String {
    "execute uma ação".to_string()
}

fn default_deadline_hours() -> u32 {
    24
}

impl Intervention {
    /// Render the deadline as a short token: `24h`, `48h`, `hoje` for
    /// twelve hours or less, otherwise whole days rounded up (`1 dia`,
    /// `3 dias`).
    pub fn deadline_token(&self) -> String {
        match self.deadline_hours {
            24 => "24h".to_string(),
            48 => "48h".to_string(),
            h if h <= 12 => "hoje".to_string(),
            h => match h.div_ceil(24) {
                1 => "1 dia".to_string(),
                days => format!("{days} dias"),
            },
        }
    }
}

/// An atomic unit of the deck, loaded once from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Unique identifier within the deck.
    pub id: String,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Primary glyph.
    #[serde(rename = "glifo")]
    pub glyph: String,
    /// ASCII fallback glyph.
    #[serde(rename = "glifo_fallback")]
    pub glyph_fallback: String,
    /// Presentation color tag.
    #[serde(rename = "cor_tag")]
    pub color_tag: String,
    /// Domain tags.
    #[serde(rename = "dominios")]
    pub domains: Vec<String>,
    /// Correspondence table.
    #[serde(rename = "correspondencias")]
    pub correspondences: Correspondences,
    /// Polarity, roughly in [-1, 1].
    #[serde(rename = "polaridade")]
    pub polarity: f64,
    /// Rarity 1-5, higher is rarer.
    #[serde(rename = "raridade")]
    pub rarity: u8,
    /// Keywords that make this symbol more likely.
    #[serde(rename = "gatilhos", default)]
    pub triggers: Vec<String>,
    /// Keywords that make this symbol less likely.
    #[serde(rename = "contraindicacoes", default)]
    pub contraindications: Vec<String>,
    /// Core phrases.
    #[serde(rename = "frases_nucleo")]
    pub core_phrases: Vec<String>,
    /// Observable-signal phrases used as evidence.
    #[serde(rename = "sinais_observaveis", default)]
    pub observable_signals: Vec<String>,
    /// Diagnostic questions.
    #[serde(rename = "perguntas_diagnostico", default)]
    pub diagnostic_questions: Vec<String>,
    /// Minimal interventions used to build the act.
    #[serde(rename = "intervencoes_minimas", default)]
    pub interventions: Vec<Intervention>,
    /// Exception phrases used as limiters.
    #[serde(rename = "excecoes", default)]
    pub exceptions: Vec<String>,
}

impl Symbol {
    /// Create a symbol with the required fields and empty optional content.
    pub fn new(id: impl Into<String>, name: impl Into<String>, polarity: f64, rarity: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            glyph: "◇".to_string(),
            glyph_fallback: "<>".to_string(),
            color_tag: "white".to_string(),
            domains: Vec::new(),
            correspondences: Correspondences::default(),
            polarity,
            rarity,
            triggers: Vec::new(),
            contraindications: Vec::new(),
            core_phrases: Vec::new(),
            observable_signals: Vec::new(),
            diagnostic_questions: Vec::new(),
            interventions: Vec::new(),
            exceptions: Vec::new(),
        }
    }

    /// Set the domain tags.
    pub fn with_domains(mut self, domains: &[&str]) -> Self {
        self.domains = domains.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Set the correspondence table.
    pub fn with_correspondences(mut self, correspondences: Correspondences) -> Self {
        self.correspondences = correspondences;
        self
    }

    /// Set the trigger keywords.
    pub fn with_triggers(mut self, triggers: &[&str]) -> Self {
        self.triggers = triggers.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Set the contraindication keywords.
    pub fn with_contraindications(mut self, contra: &[&str]) -> Self {
        self.contraindications = contra.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Whether this symbol carries the given domain tag.
    pub fn has_domain(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }
}
