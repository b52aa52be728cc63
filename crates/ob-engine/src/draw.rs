//! Weighted three-card draw.
//!
//! Each symbol starts at weight 1.0, which is then shaped by rarity,
//! session memory (motifs recur on purpose), the session echo, and keyword
//! hits in the question. The draw is ordered: past, present, future.

use ob_core::{Deck, Symbol};

use crate::rng::SeededRng;
use crate::state::SessionState;

/// Lowest weight any symbol can have.
pub const WEIGHT_FLOOR: f64 = 0.1;

/// Extra weight per prior draw of the same symbol.
pub const RECURRENCE_STEP: f64 = 0.2;

/// Weight multiplier for the session echo.
pub const ECHO_BOOST: f64 = 1.5;

/// Weight multiplier per contraindication keyword in the question.
pub const CONTRA_PENALTY: f64 = 0.3;

/// Weight multiplier per trigger keyword in the question.
pub const TRIGGER_BOOST: f64 = 1.3;

/// An ordered triple of drawn symbols.
#[derive(Debug, Clone, Copy)]
pub struct Draw<'a> {
    /// What led here.
    pub past: &'a Symbol,
    /// Where the asker stands.
    pub present: &'a Symbol,
    /// Where things tend.
    pub future: &'a Symbol,
}

impl<'a> Draw<'a> {
    /// The three symbols in order.
    pub fn symbols(&self) -> [&'a Symbol; 3] {
        [self.past, self.present, self.future]
    }

    /// The three symbol ids in order.
    pub fn ids(&self) -> [&'a str; 3] {
        [
            self.past.id.as_str(),
            self.present.id.as_str(),
            self.future.id.as_str(),
        ]
    }

    /// Whether any position holds the given symbol.
    pub fn contains(&self, symbol_id: &str) -> bool {
        self.ids().contains(&symbol_id)
    }
}

/// Rarity multiplier: rarer symbols are drawn less often.
pub fn rarity_factor(rarity: u8) -> f64 {
    match rarity {
        5 => 0.3,
        4 => 0.6,
        3 => 0.8,
        _ => 1.0,
    }
}

/// Weight of one symbol for this session and question.
pub fn symbol_weight(symbol: &Symbol, state: &SessionState, question: &str) -> f64 {
    let lower = question.to_lowercase();
    let mut weight = rarity_factor(symbol.rarity);

    let motif = state.motif_count(&symbol.id);
    if motif > 0 {
        weight *= 1.0 + RECURRENCE_STEP * f64::from(motif);
    }

    if state.echo_symbol() == Some(symbol.id.as_str()) {
        weight *= ECHO_BOOST;
    }

    for contra in &symbol.contraindications {
        if lower.contains(&contra.to_lowercase()) {
            weight *= CONTRA_PENALTY;
        }
    }

    for trigger in &symbol.triggers {
        if lower.contains(&trigger.to_lowercase()) {
            weight *= TRIGGER_BOOST;
        }
    }

    weight.max(WEIGHT_FLOOR)
}

/// Draw an ordered triple.
///
/// When the question repeats one in the session history and a previous draw
/// exists, the previous past symbol is forced into the past position.
/// The remaining positions are sampled without replacement by weight.
pub fn draw_three<'a>(
    deck: &'a Deck,
    state: &SessionState,
    rng: &mut SeededRng,
    question: &str,
) -> Draw<'a> {
    let mut pool: Vec<(&'a Symbol, f64)> = deck
        .symbols()
        .iter()
        .map(|s| (s, symbol_weight(s, state, question)))
        .collect();
    let mut selected: Vec<&'a Symbol> = Vec::with_capacity(3);

    if state.is_repeat_question(question) {
        if let Some(echo_id) = state.last_past_symbol() {
            if let Some(pos) = pool.iter().position(|(s, _)| s.id == echo_id) {
                let (forced, _) = pool.remove(pos);
                tracing::debug!(symbol = %forced.id, "forced echo in past position");
                selected.push(forced);
            }
        }
    }

    let weights: Vec<f64> = pool.iter().map(|(_, w)| *w).collect();
    for index in rng.weighted_sample(&weights, 3 - selected.len()) {
        selected.push(pool[index].0);
    }

    // Only reachable for decks that bypassed validation.
    while selected.len() < 3 {
        let Some(symbol) = rng.choose(deck.symbols()) else {
            break;
        };
        if !selected.iter().any(|s| s.id == symbol.id) {
            selected.push(symbol);
        }
    }

    tracing::debug!(
        past = %selected[0].id,
        present = %selected[1].id,
        future = %selected[2].id,
        "drew triple"
    );

    Draw {
        past: selected[0],
        present: selected[1],
        future: selected[2],
    }
}
