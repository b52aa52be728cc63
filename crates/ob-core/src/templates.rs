use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// One category of the template bank: either a flat list of templates or
/// lists keyed by discourse relation / element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateEntry {
    /// A flat list of templates.
    Flat(Vec<String>),
    /// Templates keyed by relation or element.
    Keyed(HashMap<String, Vec<String>>),
}

/// Rhetorical template bank, loaded as opaque data.
///
/// Every lookup tolerates a missing category or key by returning an empty
/// slice; the assembler then falls back to its built-in template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateBank {
    categories: HashMap<String, TemplateEntry>,
}

impl TemplateBank {
    /// An empty bank. Every lookup falls back.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the template bank document.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|source| CoreError::Parse {
            document: "templates",
            source,
        })
    }

    /// Insert a flat category.
    pub fn with_flat(mut self, category: &str, templates: &[&str]) -> Self {
        self.categories.insert(
            category.to_string(),
            TemplateEntry::Flat(templates.iter().map(|t| t.to_string()).collect()),
        );
        self
    }

    /// Insert one keyed list into a keyed category.
    pub fn with_keyed(mut self, category: &str, key: &str, templates: &[&str]) -> Self {
        let list: Vec<String> = templates.iter().map(|t| t.to_string()).collect();
        match self.categories.get_mut(category) {
            Some(TemplateEntry::Keyed(map)) => {
                map.insert(key.to_string(), list);
            }
            _ => {
                let mut map = HashMap::new();
                map.insert(key.to_string(), list);
                self.categories
                    .insert(category.to_string(), TemplateEntry::Keyed(map));
            }
        }
        self
    }

    /// Templates of a flat category. Empty if missing or keyed.
    pub fn flat(&self, category: &str) -> &[String] {
        match self.categories.get(category) {
            Some(TemplateEntry::Flat(list)) => list,
            _ => &[],
        }
    }

    /// Templates of a keyed category under `key`. Empty if missing or flat.
    pub fn keyed(&self, category: &str, key: &str) -> &[String] {
        match self.categories.get(category) {
            Some(TemplateEntry::Keyed(map)) => map.get(key).map(Vec::as_slice).unwrap_or(&[]),
            _ => &[],
        }
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the bank has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
