use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::symbol::Symbol;

/// The symbol catalog, in catalog order.
///
/// A deck is validated on construction: identifiers are unique, every
/// rarity is within 1..=5, and there are at least three symbols so a
/// three-card draw always terminates.
#[derive(Debug, Clone, Serialize)]
pub struct Deck {
    symbols: Vec<Symbol>,
}

#[derive(Deserialize)]
struct DeckDocument {
    symbols: Vec<Symbol>,
}

impl Deck {
    /// Minimum number of distinct symbols a deck must hold.
    pub const MIN_SYMBOLS: usize = 3;

    /// Build a deck, checking rarity, unique ids and size.
    pub fn new(symbols: Vec<Symbol>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for symbol in &symbols {
            if !seen.insert(symbol.id.as_str()) {
                return Err(CoreError::DuplicateSymbol(symbol.id.clone()));
            }
            if !(1..=5).contains(&symbol.rarity) {
                return Err(CoreError::InvalidRarity {
                    id: symbol.id.clone(),
                    rarity: symbol.rarity,
                });
            }
        }
        if symbols.len() < Self::MIN_SYMBOLS {
            return Err(CoreError::DeckTooSmall(symbols.len()));
        }
        Ok(Self { symbols })
    }

    /// Parse the `{"symbols": [...]}` catalog document.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let doc: DeckDocument = serde_json::from_str(json).map_err(|source| CoreError::Parse {
            document: "deck",
            source,
        })?;
        Self::new(doc.symbols)
    }

    /// All symbols in catalog order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Look up a symbol by id.
    pub fn get(&self, id: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.id == id)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the deck is empty. Always false for a validated deck.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
