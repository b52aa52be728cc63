use std::path::Path;

use crate::deck::Deck;
use crate::error::{CoreError, CoreResult};
use crate::lore::Lore;
use crate::templates::TemplateBank;

/// File name of the symbol catalog inside a data directory.
pub const DECK_FILE: &str = "deck.json";
/// File name of the template bank inside a data directory.
pub const TEMPLATES_FILE: &str = "templates.json";
/// File name of the lore document inside a data directory.
pub const LORE_FILE: &str = "lore.json";

/// The three data documents the engine consumes, loaded once.
#[derive(Debug, Clone)]
pub struct DataSet {
    /// Symbol catalog.
    pub deck: Deck,
    /// Rhetorical templates.
    pub templates: TemplateBank,
    /// World flavor and taboos.
    pub lore: Lore,
}

impl DataSet {
    /// Load `deck.json`, `templates.json` and `lore.json` from `dir`.
    pub fn load_dir(dir: &Path) -> CoreResult<Self> {
        let deck = Deck::from_json(&read(&dir.join(DECK_FILE))?)?;
        let templates = TemplateBank::from_json(&read(&dir.join(TEMPLATES_FILE))?)?;
        let lore = Lore::from_json(&read(&dir.join(LORE_FILE))?)?;
        tracing::debug!(
            dir = %dir.display(),
            symbols = deck.len(),
            template_categories = templates.len(),
            taboos = lore.taboos.len(),
            "data set loaded"
        );
        Ok(Self {
            deck,
            templates,
            lore,
        })
    }
}

fn read(path: &Path) -> CoreResult<String> {
    std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DECK: &str = r#"{"symbols": [
        {"id": "a", "nome": "A", "glifo": "a", "glifo_fallback": "a", "cor_tag": "x",
         "dominios": [], "correspondencias": {}, "polaridade": 0.0, "raridade": 1, "frases_nucleo": []},
        {"id": "b", "nome": "B", "glifo": "b", "glifo_fallback": "b", "cor_tag": "x",
         "dominios": [], "correspondencias": {}, "polaridade": 0.0, "raridade": 1, "frases_nucleo": []},
        {"id": "c", "nome": "C", "glifo": "c", "glifo_fallback": "c", "cor_tag": "x",
         "dominios": [], "correspondencias": {}, "polaridade": 0.0, "raridade": 1, "frases_nucleo": []}
    ]}"#;

    fn write_all(dir: &Path) {
        fs::write(dir.join(DECK_FILE), DECK).unwrap();
        fs::write(dir.join(TEMPLATES_FILE), "{}").unwrap();
        fs::write(dir.join(LORE_FILE), r#"{"entity": {"name": "O"}}"#).unwrap();
    }

    #[test]
    fn loads_complete_directory() {
        let dir = TempDir::new().unwrap();
        write_all(dir.path());
        let data = DataSet::load_dir(dir.path()).unwrap();
        assert_eq!(data.deck.len(), 3);
        assert!(data.templates.is_empty());
        assert_eq!(data.lore.entity.name, "O");
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        write_all(dir.path());
        fs::remove_file(dir.path().join(LORE_FILE)).unwrap();
        let err = DataSet::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
        assert!(err.to_string().contains(LORE_FILE));
    }
}
