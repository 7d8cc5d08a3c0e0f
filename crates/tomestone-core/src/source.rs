//! Raw table sources: named dataset texts and on-disk discovery.

use crate::store::BuildError;
use std::collections::HashMap;
use std::path::Path;

/// The datasets a complete store is built from.
pub const DATASETS: &[&str] = &[
    "item",
    "recipe",
    "recipe_level",
    "recipe_lookup",
    "gathering_item",
    "gathering_item_level",
    "fish_parameter",
    "fishing_spot",
    "spearfishing_item",
    "spearfishing_notebook",
    "place_name",
];

/// A named collection of raw table texts, keyed by dataset name.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    tables: HashMap<String, String>,
}

impl TableSet {
    pub fn new() -> TableSet {
        TableSet::default()
    }

    /// Register (or replace) the raw text of one dataset.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.tables.insert(name.into(), text.into());
    }

    /// The raw text of one dataset, if registered.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tables.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Load every required dataset from `<dir>/<name>.csv`.
    ///
    /// Each dataset in [`DATASETS`] must be present; a missing file is
    /// reported by dataset name rather than as a bare io error.
    pub fn from_dir(dir: &Path) -> Result<TableSet, BuildError> {
        let mut set = TableSet::new();
        for name in DATASETS {
            let path = dir.join(format!("{name}.csv"));
            if !path.is_file() {
                return Err(BuildError::MissingFile {
                    name: (*name).to_string(),
                    dir: dir.to_path_buf(),
                });
            }
            log::debug!("loading dataset '{name}' from {}", path.display());
            set.insert(*name, std::fs::read_to_string(&path)?);
        }
        Ok(set)
    }
}
