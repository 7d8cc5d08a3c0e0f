//! The table store: every dataset parsed, sanitized, and indexed once.
//!
//! A [`TableStore`] is built from a [`TableSet`] in one pass and is
//! immutable afterwards; resolvers and search layers borrow tables and
//! indexes from it without further locking.

use crate::index::TableIndex;
use crate::source::TableSet;
use crate::table::{ParseError, ParseOptions, RawTable};
use std::path::PathBuf;

/// Errors produced while assembling a [`TableStore`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A required dataset was not registered in the source set.
    #[error("required dataset '{name}' is not registered")]
    MissingDataset { name: String },

    /// A dataset's text failed to parse.
    #[error("dataset '{name}' failed to parse")]
    Parse {
        name: String,
        #[source]
        source: ParseError,
    },

    /// Directory discovery found no file for a required dataset.
    #[error("no file for dataset '{name}' under {dir}")]
    MissingFile { name: String, dir: PathBuf },

    #[error("io error reading dataset")]
    Io(#[from] std::io::Error),
}

/// All sanitized tables plus the indexes the resolvers and search need.
#[derive(Debug, Clone)]
pub struct TableStore {
    items: RawTable,
    item_names: TableIndex,
    recipes: RawTable,
    recipe_results: TableIndex,
    recipe_levels: RawTable,
    recipe_lookups: RawTable,
    gathering_items: RawTable,
    gathering_by_item: TableIndex,
    gathering_item_levels: RawTable,
    fish_parameters: RawTable,
    fish_by_item: TableIndex,
    fishing_spots: RawTable,
    spearfishing_items: RawTable,
    spearfishing_by_item: TableIndex,
    spearfishing_notebooks: RawTable,
    place_names: RawTable,
    place_name_index: TableIndex,
}

fn parse_dataset(
    set: &TableSet,
    name: &str,
    opts: ParseOptions,
) -> Result<RawTable, BuildError> {
    let text = set.get(name).ok_or_else(|| BuildError::MissingDataset {
        name: name.to_string(),
    })?;
    let table = RawTable::parse(text, opts).map_err(|source| BuildError::Parse {
        name: name.to_string(),
        source,
    })?;
    log::info!("dataset '{name}': {} rows", table.len());
    Ok(table)
}

impl TableStore {
    /// Parse every required dataset and build the standing indexes.
    ///
    /// Fails on the first missing or malformed dataset; a store is either
    /// complete or absent.
    pub fn build(set: &TableSet) -> Result<TableStore, BuildError> {
        let opts = ParseOptions::default();

        let items = parse_dataset(set, "item", opts)?;
        let recipes = parse_dataset(set, "recipe", opts)?;
        let recipe_levels = parse_dataset(set, "recipe_level", opts)?;
        let recipe_lookups = parse_dataset(set, "recipe_lookup", opts)?;
        let gathering_items = parse_dataset(set, "gathering_item", opts)?;
        // The level table's identifier column carries no information beyond
        // the row key, so it is dropped rather than renamed.
        let gathering_item_levels = parse_dataset(
            set,
            "gathering_item_level",
            ParseOptions {
                rename_id: false,
                ..opts
            },
        )?;
        let fish_parameters = parse_dataset(set, "fish_parameter", opts)?;
        let fishing_spots = parse_dataset(set, "fishing_spot", opts)?;
        let spearfishing_items = parse_dataset(set, "spearfishing_item", opts)?;
        let spearfishing_notebooks = parse_dataset(set, "spearfishing_notebook", opts)?;
        let place_names = parse_dataset(set, "place_name", opts)?;

        let item_names = TableIndex::build(&items, "name", true);
        let recipe_results = TableIndex::build(&recipes, "item_result", false);
        let gathering_by_item = TableIndex::build(&gathering_items, "item", true);
        let fish_by_item = TableIndex::build(&fish_parameters, "item", true);
        let spearfishing_by_item = TableIndex::build(&spearfishing_items, "item", true);
        let place_name_index = TableIndex::build(&place_names, "name", true);

        Ok(TableStore {
            items,
            item_names,
            recipes,
            recipe_results,
            recipe_levels,
            recipe_lookups,
            gathering_items,
            gathering_by_item,
            gathering_item_levels,
            fish_parameters,
            fish_by_item,
            fishing_spots,
            spearfishing_items,
            spearfishing_by_item,
            spearfishing_notebooks,
            place_names,
            place_name_index,
        })
    }

    /// Build a store straight from a directory of `<dataset>.csv` files.
    pub fn from_dir(dir: &std::path::Path) -> Result<TableStore, BuildError> {
        TableStore::build(&TableSet::from_dir(dir)?)
    }

    /// Look a table up by dataset name. Every name in
    /// [`DATASETS`](crate::source::DATASETS) resolves.
    pub fn table(&self, name: &str) -> Option<&RawTable> {
        match name {
            "item" => Some(&self.items),
            "recipe" => Some(&self.recipes),
            "recipe_level" => Some(&self.recipe_levels),
            "recipe_lookup" => Some(&self.recipe_lookups),
            "gathering_item" => Some(&self.gathering_items),
            "gathering_item_level" => Some(&self.gathering_item_levels),
            "fish_parameter" => Some(&self.fish_parameters),
            "fishing_spot" => Some(&self.fishing_spots),
            "spearfishing_item" => Some(&self.spearfishing_items),
            "spearfishing_notebook" => Some(&self.spearfishing_notebooks),
            "place_name" => Some(&self.place_names),
            _ => None,
        }
    }

    pub fn items(&self) -> &RawTable {
        &self.items
    }

    /// Item id -> name, plus name -> id.
    pub fn item_names(&self) -> &TableIndex {
        &self.item_names
    }

    pub fn recipes(&self) -> &RawTable {
        &self.recipes
    }

    /// Recipe id -> result item id.
    pub fn recipe_results(&self) -> &TableIndex {
        &self.recipe_results
    }

    pub fn recipe_levels(&self) -> &RawTable {
        &self.recipe_levels
    }

    pub fn recipe_lookups(&self) -> &RawTable {
        &self.recipe_lookups
    }

    pub fn gathering_items(&self) -> &RawTable {
        &self.gathering_items
    }

    /// Gathering entry id -> item id, plus item id -> gathering entry id.
    pub fn gathering_by_item(&self) -> &TableIndex {
        &self.gathering_by_item
    }

    pub fn gathering_item_levels(&self) -> &RawTable {
        &self.gathering_item_levels
    }

    pub fn fish_parameters(&self) -> &RawTable {
        &self.fish_parameters
    }

    /// Fish entry id -> item id, plus item id -> fish entry id.
    pub fn fish_by_item(&self) -> &TableIndex {
        &self.fish_by_item
    }

    pub fn fishing_spots(&self) -> &RawTable {
        &self.fishing_spots
    }

    pub fn spearfishing_items(&self) -> &RawTable {
        &self.spearfishing_items
    }

    /// Spearfishing entry id -> item id, plus item id -> spearfishing entry id.
    pub fn spearfishing_by_item(&self) -> &TableIndex {
        &self.spearfishing_by_item
    }

    pub fn spearfishing_notebooks(&self) -> &RawTable {
        &self.spearfishing_notebooks
    }

    pub fn place_names(&self) -> &RawTable {
        &self.place_names
    }

    /// Place id -> name, plus name -> place id.
    pub fn place_name_index(&self) -> &TableIndex {
        &self.place_name_index
    }
}
