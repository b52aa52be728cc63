//! Content and sentence microplanning.
//!
//! Content planning pulls semantic slots out of each drawn symbol, with a
//! fixed fallback for every missing correspondence. Sentence planning picks
//! referring expressions (first mention vs. later mentions) and connectives.

use std::collections::HashSet;

use ob_core::{Intervention, Symbol};

use crate::draw::Draw;
use crate::nlg::discourse::DiscourseRelation;
use crate::rng::SeededRng;

/// Used concepts after which a repeat is tolerated again.
pub const CONCEPT_MEMORY: usize = 5;

/// Semantic slots of one drawn symbol.
#[derive(Debug, Clone)]
pub struct SymbolContent<'a> {
    /// The symbol these slots came from.
    pub symbol: &'a Symbol,
    /// The symbol's virtue ("pilar").
    pub quality: String,
    /// Failure mode of the virtue.
    pub shadow: String,
    /// The action the symbol asks for.
    pub verb: String,
    /// Classical element, possibly empty.
    pub element: String,
    /// When the symbol applies.
    pub condition: String,
    /// What to look out for.
    pub signal: String,
    /// Raw observable-signal phrases.
    pub observable_signals: &'a [String],
    /// Minimal interventions.
    pub interventions: &'a [Intervention],
    /// Exception phrases.
    pub exceptions: &'a [String],
}

impl<'a> SymbolContent<'a> {
    /// Extract slots, falling back to `ação` / `limite` / `age` for a
    /// missing quality, shadow, or verb.
    pub fn extract(symbol: &'a Symbol) -> Self {
        let corr = &symbol.correspondences;
        let condition = match symbol.contraindications.first() {
            Some(contra) => format!("quando não há {contra}"),
            None => "quando necessário".to_string(),
        };
        let signal = match symbol.triggers.first() {
            Some(trigger) => format!("o sinal é {trigger}"),
            None => "observe os padrões".to_string(),
        };
        Self {
            symbol,
            quality: corr.quality.clone().unwrap_or_else(|| "ação".to_string()),
            shadow: corr.shadow.clone().unwrap_or_else(|| "limite".to_string()),
            verb: corr.verb.clone().unwrap_or_else(|| "age".to_string()),
            element: corr.element.clone().unwrap_or_default(),
            condition,
            signal,
            observable_signals: &symbol.observable_signals,
            interventions: &symbol.interventions,
            exceptions: &symbol.exceptions,
        }
    }

    /// First domain tag, or `geral`.
    pub fn primary_domain(&self) -> &str {
        self.symbol
            .domains
            .first()
            .map(String::as_str)
            .unwrap_or("geral")
    }

    fn term(&self, kind: LexKind) -> &str {
        match kind {
            LexKind::Verb => &self.verb,
            LexKind::Quality => &self.quality,
            LexKind::Shadow => &self.shadow,
        }
    }

    fn term_mut(&mut self, kind: LexKind) -> &mut String {
        match kind {
            LexKind::Verb => &mut self.verb,
            LexKind::Quality => &mut self.quality,
            LexKind::Shadow => &mut self.shadow,
        }
    }

    fn concept(&self) -> Concept {
        Concept {
            quality: self.quality.to_lowercase(),
            shadow: self.shadow.to_lowercase(),
            verb: self.verb.to_lowercase(),
            domain: self.primary_domain().to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Concept {
    quality: String,
    shadow: String,
    verb: String,
    domain: String,
}

/// Remembers which concepts a reading has already voiced.
#[derive(Debug, Default)]
pub struct ConceptTracker {
    used: HashSet<Concept>,
    last: Option<Concept>,
}

impl ConceptTracker {
    /// An empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the content's concept if it is new.
    ///
    /// Rejects an immediate repeat, and any repeat while fewer than
    /// [`CONCEPT_MEMORY`] concepts are in use.
    pub fn admit(&mut self, content: &SymbolContent<'_>) -> bool {
        let concept = content.concept();
        if self.last.as_ref() == Some(&concept) {
            return false;
        }
        if self.used.contains(&concept) && self.used.len() < CONCEPT_MEMORY {
            return false;
        }
        self.used.insert(concept.clone());
        self.last = Some(concept);
        true
    }
}

/// Which correspondence a lexicon lookup is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexKind {
    /// Verbs.
    Verb,
    /// Qualities.
    Quality,
    /// Shadows.
    Shadow,
}

struct LexiconEntry {
    key: &'static str,
    verbs: &'static [&'static str],
    qualities: &'static [&'static str],
    shadows: &'static [&'static str],
}

impl LexiconEntry {
    fn terms(&self, kind: LexKind) -> &'static [&'static str] {
        match kind {
            LexKind::Verb => self.verbs,
            LexKind::Quality => self.qualities,
            LexKind::Shadow => self.shadows,
        }
    }
}

const LEXICON: &[LexiconEntry] = &[
    LexiconEntry {
        key: "voto",
        verbs: &["prometer", "comprometer", "selar", "jurar"],
        qualities: &["fidelidade", "compromisso", "juramento", "palavra"],
        shadows: &["traição", "quebra", "infidelidade", "mentira"],
    },
    LexiconEntry {
        key: "ferro",
        verbs: &["limitar", "cortar", "definir", "marcar"],
        qualities: &["resistência", "fronteira", "limite", "barreira"],
        shadows: &["rigidez", "aprisionamento", "bloqueio", "imobilidade"],
    },
    LexiconEntry {
        key: "mare",
        verbs: &["fluir", "alternar", "ciclar", "oscilar"],
        qualities: &["ritmo", "ciclo", "alternância", "movimento"],
        shadows: &["inconstância", "instabilidade", "dispersão", "caos"],
    },
    LexiconEntry {
        key: "eco",
        verbs: &["retornar", "repetir", "ressonar", "amplificar"],
        qualities: &["memória", "insistência", "persistência", "retorno"],
        shadows: &["obsessão", "repetição", "estagnação", "bloqueio"],
    },
    LexiconEntry {
        key: "lamina",
        verbs: &["cortar", "separar", "dividir", "decidir"],
        qualities: &["precisão", "decisão", "separação", "clareza"],
        shadows: &["violência", "destruição", "ruptura", "perda"],
    },
];

/// Built-in synonym lists keyed by symbol id or domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexicon;

impl Lexicon {
    fn entry(key: &str) -> Option<&'static LexiconEntry> {
        LEXICON.iter().find(|e| e.key == key)
    }

    /// Synonyms of `term` under `key`, skipping `term` itself and anything
    /// in `taken`. Unknown keys have none.
    pub fn alternatives(
        &self,
        term: &str,
        key: &str,
        kind: LexKind,
        taken: &[String],
    ) -> Vec<&'static str> {
        let lower = term.to_lowercase();
        Self::entry(key)
            .map(|e| e.terms(kind))
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|t| *t != lower && !taken.iter().any(|u| u.to_lowercase() == *t))
            .collect()
    }
}

/// Order in which slots are swapped for synonyms.
const RELEXICALIZE_ORDER: [LexKind; 3] = [LexKind::Quality, LexKind::Shadow, LexKind::Verb];

/// Swap one slot of a rejected concept for a synonym the reading has not
/// used yet, until the tracker admits it. Leaves the content unchanged and
/// returns false when no synonym is admitted.
fn relexicalize(
    content: &mut SymbolContent<'_>,
    tracker: &mut ConceptTracker,
    voiced: &[SymbolContent<'_>],
) -> bool {
    let symbol = content.symbol;
    let keys: Vec<&str> = std::iter::once(symbol.id.as_str())
        .chain(symbol.domains.iter().map(String::as_str))
        .collect();
    for kind in RELEXICALIZE_ORDER {
        let original = content.term(kind).to_string();
        let taken: Vec<String> = voiced.iter().map(|c| c.term(kind).to_string()).collect();
        for key in &keys {
            for synonym in Lexicon.alternatives(&original, key, kind, &taken) {
                *content.term_mut(kind) = synonym.to_string();
                if tracker.admit(content) {
                    tracing::debug!(
                        symbol = %symbol.id,
                        ?kind,
                        from = %original,
                        to = synonym,
                        "relexicalized"
                    );
                    return true;
                }
            }
        }
        *content.term_mut(kind) = original;
    }
    false
}

/// Extract slots for a draw.
///
/// A symbol whose concept repeats one already voiced gets a slot swapped for
/// a lexicon synonym, looked up by symbol id then by domain.
pub fn plan_content<'a>(draw: &Draw<'a>) -> [SymbolContent<'a>; 3] {
    let mut tracker = ConceptTracker::new();
    let mut voiced: Vec<SymbolContent<'a>> = Vec::with_capacity(3);
    draw.symbols().map(|symbol| {
        let mut content = SymbolContent::extract(symbol);
        if !tracker.admit(&content) && !relexicalize(&mut content, &mut tracker, &voiced) {
            tracing::debug!(symbol = %symbol.id, "no synonym left, concept repeats");
        }
        voiced.push(content.clone());
        content
    })
}

/// Nickname used for a later mention of a known symbol.
pub fn nickname(symbol_id: &str) -> Option<&'static str> {
    Some(match symbol_id {
        "ferro" => "o Ferro",
        "mare" => "a Maré",
        "eco" => "o Eco",
        "ferrugem" => "a Ferrugem",
        "lamina" => "a Lâmina",
        "porta" => "a Porta",
        "espelho" => "o Espelho",
        "no" => "o Nó",
        "vazio" => "o Vazio",
        "chama" => "a Chama",
        "raiz" => "a Raiz",
        "vento" => "o Vento",
        _ => return None,
    })
}

/// Referring expressions and connectives for one reading.
#[derive(Debug, Default)]
pub struct SentencePlanner {
    mentioned: HashSet<String>,
}

impl SentencePlanner {
    /// A planner with nothing mentioned yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refer to a symbol: `glyph name` on first mention, then a nickname,
    /// the lowercased name when it starts with an article, or `isto`.
    pub fn reference(&mut self, symbol: &Symbol) -> String {
        if self.mentioned.insert(symbol.id.clone()) {
            return format!("{} {}", symbol.glyph, symbol.name);
        }
        if let Some(nick) = nickname(&symbol.id) {
            return nick.to_string();
        }
        if symbol.name.starts_with("O ") || symbol.name.starts_with("A ") {
            return symbol.name.to_lowercase();
        }
        "isto".to_string()
    }

    /// Pick a connective for the relation.
    pub fn connector(&self, relation: DiscourseRelation, rng: &mut SeededRng) -> &'static str {
        rng.choose(relation.connectors()).copied().unwrap_or("então")
    }
}
