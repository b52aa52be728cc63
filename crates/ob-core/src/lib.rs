//! Core data model for Observador: symbols, the deck, the template bank, and lore.
//!
//! This crate only describes and loads data. It is independent of the
//! reading engine: you can construct a [`Deck`] programmatically or
//! deserialize one from the JSON catalog.

/// Validated, ordered collection of symbols.
pub mod deck;
/// Error types used throughout the crate.
pub mod error;
/// JSON loaders for the catalog, template bank, and lore documents.
pub mod load;
/// World-flavor document: entity signature, laws, effects, and taboos.
pub mod lore;
/// Symbol records and their correspondence tables.
pub mod symbol;
/// Rhetorical template bank keyed by category.
pub mod templates;

/// Re-export the deck.
pub use deck::Deck;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the bundled data set.
pub use load::DataSet;
/// Re-export lore types.
pub use lore::{Lore, TabooRule};
/// Re-export symbol types.
pub use symbol::{Correspondences, Intervention, Symbol};
/// Re-export the template bank.
pub use templates::{TemplateBank, TemplateEntry};
