use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading or validating data documents.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A data file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A data document is not valid JSON for its schema.
    #[error("malformed {document}: {source}")]
    Parse {
        /// Which document failed ("deck", "templates", "lore").
        document: &'static str,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Two symbols share the same identifier.
    #[error("duplicate symbol id: \"{0}\"")]
    DuplicateSymbol(String),

    /// A symbol's rarity is outside 1..=5.
    #[error("symbol \"{id}\" has rarity {rarity}, expected 1-5")]
    InvalidRarity {
        /// The offending symbol.
        id: String,
        /// The rarity found in the catalog.
        rarity: u8,
    },

    /// The deck cannot fill a three-card draw.
    #[error("deck has {0} symbols, at least 3 are required")]
    DeckTooSmall(usize),
}
