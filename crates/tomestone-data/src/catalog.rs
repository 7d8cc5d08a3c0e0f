//! The catalog: per-kind entity resolution over an immutable table store.
//!
//! Resolution is lazy and cached. Each kind has its own cache keyed by
//! numeric id; the first resolution builds the entity (recursively resolving
//! foreign keys through the other resolvers) and inserts it, later lookups
//! return the same `Arc`. Two threads racing on an uncached id may both
//! build the entity; the first insert wins and the loser's copy is dropped.

use crate::entity::{
    FishParameter, FishingSpot, GatheringItem, GatheringItemLevel, Ingredient, Item, JobRecipe,
    PlaceName, Recipe, RecipeLevel, SpearFishingItem, SpearFishingNotebook,
};
use crate::enums::Coded;
use crate::error::{EntityKind, LookupError};
use crate::{CatchStats, MarketSnapshot};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tomestone_core::table::{RawTable, Row};
use tomestone_core::{BuildError, TableStore};

type Cache<T> = RwLock<HashMap<u32, Arc<T>>>;

// Lock poisoning carries no meaning for these caches: a panicking builder
// never leaves a partial entry behind, so the data is always usable.
fn read<T>(cache: &Cache<T>) -> RwLockReadGuard<'_, HashMap<u32, Arc<T>>> {
    cache.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(cache: &Cache<T>) -> RwLockWriteGuard<'_, HashMap<u32, Arc<T>>> {
    cache.write().unwrap_or_else(|e| e.into_inner())
}

// ===========================================================================
// Row field helpers
// ===========================================================================

fn row_i64(row: &Row, field: &str) -> Option<i64> {
    row.get(field)?.as_int()
}

fn row_flag(row: &Row, field: &str) -> bool {
    row.get(field).and_then(|v| v.as_flag()).unwrap_or(false)
}

fn row_str(row: &Row, field: &str) -> Option<String> {
    Some(row.get(field)?.as_str()?.to_string())
}

/// A foreign-key field: present, positive, and in `u32` range. Zero is the
/// "no reference" sentinel and reads as absent.
fn row_ref(row: &Row, field: &str) -> Option<u32> {
    let raw = row_i64(row, field)?;
    if raw <= 0 {
        return None;
    }
    u32::try_from(raw).ok()
}

fn coded<T: TryFrom<i64, Error = i64>>(row: &Row, field: &str) -> Coded<T> {
    let raw = row_i64(row, field).unwrap_or(0);
    if raw == 0 {
        // Absent or sentinel; decode quietly since many tables use 0 as
        // "no category".
        return T::try_from(0).map(Coded::Known).unwrap_or(Coded::Raw(0));
    }
    Coded::decode(raw, field)
}

// ===========================================================================
// Catalog
// ===========================================================================

/// Resolves and caches typed entities over a built [`TableStore`].
pub struct Catalog {
    store: TableStore,
    items: Cache<Item>,
    job_recipes: Cache<JobRecipe>,
    recipes: Cache<Recipe>,
    recipe_levels: Cache<RecipeLevel>,
    gathering_items: Cache<GatheringItem>,
    gathering_item_levels: Cache<GatheringItemLevel>,
    fish_parameters: Cache<FishParameter>,
    fishing_spots: Cache<FishingSpot>,
    spearfishing_items: Cache<SpearFishingItem>,
    spearfishing_notebooks: Cache<SpearFishingNotebook>,
    place_names: Cache<PlaceName>,
    pub(crate) market: RwLock<HashMap<u32, MarketSnapshot>>,
    pub(crate) catch_stats: RwLock<HashMap<u32, CatchStats>>,
}

// The caches make a derived impl useless noise; report their fill instead.
impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("items_cached", &read(&self.items).len())
            .field("recipes_cached", &read(&self.recipes).len())
            .field("place_names_cached", &read(&self.place_names).len())
            .finish_non_exhaustive()
    }
}

fn fetch_row<'a>(
    table: &'a RawTable,
    id: u32,
    kind: EntityKind,
    context: &'static str,
) -> Result<&'a Row, LookupError> {
    table.get(&id.to_string()).ok_or_else(|| LookupError::NotFound {
        kind,
        query: id.to_string(),
        field: "id",
        context,
    })
}

fn require_field(
    row: &Row,
    field: &'static str,
    id: u32,
    kind: EntityKind,
    context: &'static str,
) -> Result<(), LookupError> {
    if row.contains_key(field) {
        Ok(())
    } else {
        Err(LookupError::ShapeMismatch {
            kind,
            query: id.to_string(),
            field,
            context,
        })
    }
}

impl Catalog {
    pub fn new(store: TableStore) -> Catalog {
        Catalog {
            store,
            items: Cache::default(),
            job_recipes: Cache::default(),
            recipes: Cache::default(),
            recipe_levels: Cache::default(),
            gathering_items: Cache::default(),
            gathering_item_levels: Cache::default(),
            fish_parameters: Cache::default(),
            fishing_spots: Cache::default(),
            spearfishing_items: Cache::default(),
            spearfishing_notebooks: Cache::default(),
            place_names: Cache::default(),
            market: RwLock::default(),
            catch_stats: RwLock::default(),
        }
    }

    /// Build the store from a directory of datasets and wrap it.
    pub fn from_dir(dir: &Path) -> Result<Catalog, BuildError> {
        Ok(Catalog::new(TableStore::from_dir(dir)?))
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    /// Resolve an item by id, including its acquisition routes.
    ///
    /// The recipe, gathering, fishing, and spearfishing cross-references are
    /// optional: an item with none of them still resolves.
    pub fn item(&self, id: u32) -> Result<Arc<Item>, LookupError> {
        if let Some(hit) = read(&self.items).get(&id) {
            return Ok(hit.clone());
        }
        let row = fetch_row(self.store.items(), id, EntityKind::Item, "item")?;
        require_field(row, "level_item", id, EntityKind::Item, "item")?;

        log::debug!("resolving item {id}");
        let entity = Arc::new(Item {
            id,
            name: row_str(row, "name").unwrap_or_default(),
            description: row_str(row, "description"),
            level_item: row_i64(row, "level_item").unwrap_or(0),
            level_equip: row_i64(row, "level_equip").unwrap_or(0),
            rarity: row_i64(row, "rarity").unwrap_or(0),
            stack_size: row_i64(row, "stack_size").unwrap_or(1),
            price_mid: row_i64(row, "price_mid").unwrap_or(0),
            price_low: row_i64(row, "price_low").unwrap_or(0),
            is_unique: row_flag(row, "is_unique"),
            is_untradable: row_flag(row, "is_untradable"),
            is_collectable: row_flag(row, "is_collectable"),
            can_be_hq: row_flag(row, "can_be_hq"),
            item_ui_category: coded(row, "item_ui_category"),
            equip_slot_category: coded(row, "equip_slot_category"),
            recipes: self.job_recipes(id).ok().filter(|r| !r.is_empty()),
            gathering: self.gathering_item_for(id).ok(),
            fishing: self.fish_parameter_for(id).ok(),
            spearfishing: self.spearfishing_item_for(id).ok(),
        });
        Ok(write(&self.items).entry(id).or_insert(entity).clone())
    }

    /// The per-job recipe row for a result item. Every referenced recipe
    /// must itself resolve.
    pub fn job_recipes(&self, item_id: u32) -> Result<Arc<JobRecipe>, LookupError> {
        if let Some(hit) = read(&self.job_recipes).get(&item_id) {
            return Ok(hit.clone());
        }
        let row = fetch_row(
            self.store.recipe_lookups(),
            item_id,
            EntityKind::JobRecipe,
            "job_recipes",
        )?;
        require_field(row, "CRP", item_id, EntityKind::JobRecipe, "job_recipes")?;

        let resolve = |field: &str| -> Result<Option<Arc<Recipe>>, LookupError> {
            row_ref(row, field).map(|rid| self.recipe(rid)).transpose()
        };
        let entity = Arc::new(JobRecipe {
            item_id,
            carpenter: resolve("CRP")?,
            blacksmith: resolve("BSM")?,
            armorer: resolve("ARM")?,
            goldsmith: resolve("GSM")?,
            leatherworker: resolve("LTW")?,
            weaver: resolve("WVR")?,
            alchemist: resolve("ALC")?,
            culinarian: resolve("CUL")?,
        });
        Ok(write(&self.job_recipes)
            .entry(item_id)
            .or_insert(entity)
            .clone())
    }

    /// Resolve a recipe. The result item must exist in the item table; the
    /// ingredient list stays raw identifier/amount pairs.
    pub fn recipe(&self, id: u32) -> Result<Arc<Recipe>, LookupError> {
        if let Some(hit) = read(&self.recipes).get(&id) {
            return Ok(hit.clone());
        }
        let row = fetch_row(self.store.recipes(), id, EntityKind::Recipe, "recipe")?;
        require_field(row, "item_result", id, EntityKind::Recipe, "recipe")?;

        let item_result = row_ref(row, "item_result").ok_or_else(|| LookupError::ShapeMismatch {
            kind: EntityKind::Recipe,
            query: id.to_string(),
            field: "item_result",
            context: "recipe",
        })?;
        if !self.store.item_names().contains_row(&item_result.to_string()) {
            return Err(LookupError::NotFound {
                kind: EntityKind::Item,
                query: item_result.to_string(),
                field: "item_result",
                context: "recipe",
            });
        }

        let mut ingredients = Vec::new();
        for slot in 0..10 {
            let item_field = format!("item_ingredient{slot}");
            let amount_field = format!("amount_ingredient{slot}");
            if let Some(item_id) = row_ref(row, &item_field) {
                ingredients.push(Ingredient {
                    item_id,
                    amount: row_i64(row, &amount_field).unwrap_or(0),
                });
            }
        }

        let entity = Arc::new(Recipe {
            id,
            craft_type: coded(row, "craft_type"),
            recipe_level: row_ref(row, "recipe_level_table")
                .and_then(|lv| self.recipe_level(lv).ok()),
            item_result,
            amount_result: row_i64(row, "amount_result").unwrap_or(1),
            ingredients,
            can_quick_synth: row_flag(row, "can_quick_synth"),
            can_hq: row_flag(row, "can_hq"),
            is_expert: row_flag(row, "is_expert"),
            required_craftsmanship: row_i64(row, "required_craftsmanship").unwrap_or(0),
            required_control: row_i64(row, "required_control").unwrap_or(0),
            difficulty_factor: row_i64(row, "difficulty_factor").unwrap_or(0),
            quality_factor: row_i64(row, "quality_factor").unwrap_or(0),
            durability_factor: row_i64(row, "durability_factor").unwrap_or(0),
        });
        Ok(write(&self.recipes).entry(id).or_insert(entity).clone())
    }

    pub fn recipe_level(&self, id: u32) -> Result<Arc<RecipeLevel>, LookupError> {
        if let Some(hit) = read(&self.recipe_levels).get(&id) {
            return Ok(hit.clone());
        }
        let row = fetch_row(
            self.store.recipe_levels(),
            id,
            EntityKind::RecipeLevel,
            "recipe_level",
        )?;
        require_field(row, "class_job_level", id, EntityKind::RecipeLevel, "recipe_level")?;

        let entity = Arc::new(RecipeLevel {
            id,
            class_job_level: row_i64(row, "class_job_level").unwrap_or(0),
            stars: row_i64(row, "stars").unwrap_or(0),
            suggested_craftsmanship: row_i64(row, "suggested_craftsmanship").unwrap_or(0),
            difficulty: row_i64(row, "difficulty").unwrap_or(0),
            quality: row_i64(row, "quality").unwrap_or(0),
            progress_divider: row_i64(row, "progress_divider").unwrap_or(0),
            quality_divider: row_i64(row, "quality_divider").unwrap_or(0),
            progress_modifier: row_i64(row, "progress_modifier").unwrap_or(0),
            quality_modifier: row_i64(row, "quality_modifier").unwrap_or(0),
            durability: row_i64(row, "durability").unwrap_or(0),
        });
        Ok(write(&self.recipe_levels).entry(id).or_insert(entity).clone())
    }

    /// The gathering entry for an item, found through the inverse index.
    pub fn gathering_item_for(&self, item_id: u32) -> Result<Arc<GatheringItem>, LookupError> {
        let key = self
            .store
            .gathering_by_item()
            .row_key_of(&item_id.to_string())
            .ok_or_else(|| LookupError::NotFound {
                kind: EntityKind::GatheringItem,
                query: item_id.to_string(),
                field: "item",
                context: "gathering_item_for",
            })?;
        let id = parse_row_key(key, EntityKind::GatheringItem, "gathering_item_for")?;
        self.gathering_item(id)
    }

    pub fn gathering_item(&self, id: u32) -> Result<Arc<GatheringItem>, LookupError> {
        if let Some(hit) = read(&self.gathering_items).get(&id) {
            return Ok(hit.clone());
        }
        let row = fetch_row(
            self.store.gathering_items(),
            id,
            EntityKind::GatheringItem,
            "gathering_item",
        )?;
        require_field(
            row,
            "gathering_item_level",
            id,
            EntityKind::GatheringItem,
            "gathering_item",
        )?;

        let level = row_ref(row, "gathering_item_level")
            .map(|lv| self.gathering_item_level(lv))
            .transpose()?;
        let entity = Arc::new(GatheringItem {
            id,
            item_id: row_ref(row, "item").unwrap_or(0),
            level,
            quest: row_flag(row, "quest"),
            is_hidden: row_flag(row, "is_hidden"),
        });
        Ok(write(&self.gathering_items).entry(id).or_insert(entity).clone())
    }

    pub fn gathering_item_level(&self, id: u32) -> Result<Arc<GatheringItemLevel>, LookupError> {
        if let Some(hit) = read(&self.gathering_item_levels).get(&id) {
            return Ok(hit.clone());
        }
        let row = fetch_row(
            self.store.gathering_item_levels(),
            id,
            EntityKind::GatheringItemLevel,
            "gathering_item_level",
        )?;
        require_field(
            row,
            "stars",
            id,
            EntityKind::GatheringItemLevel,
            "gathering_item_level",
        )?;

        let entity = Arc::new(GatheringItemLevel {
            id,
            level: row_i64(row, "gathering_item_level").unwrap_or(0),
            stars: row_i64(row, "stars").unwrap_or(0),
        });
        Ok(write(&self.gathering_item_levels)
            .entry(id)
            .or_insert(entity)
            .clone())
    }

    /// The fish entry for an item, found through the inverse index.
    pub fn fish_parameter_for(&self, item_id: u32) -> Result<Arc<FishParameter>, LookupError> {
        let key = self
            .store
            .fish_by_item()
            .row_key_of(&item_id.to_string())
            .ok_or_else(|| LookupError::NotFound {
                kind: EntityKind::FishParameter,
                query: item_id.to_string(),
                field: "item",
                context: "fish_parameter_for",
            })?;
        let id = parse_row_key(key, EntityKind::FishParameter, "fish_parameter_for")?;
        self.fish_parameter(id)
    }

    pub fn fish_parameter(&self, id: u32) -> Result<Arc<FishParameter>, LookupError> {
        if let Some(hit) = read(&self.fish_parameters).get(&id) {
            return Ok(hit.clone());
        }
        let row = fetch_row(
            self.store.fish_parameters(),
            id,
            EntityKind::FishParameter,
            "fish_parameter",
        )?;
        require_field(row, "fishing_spot", id, EntityKind::FishParameter, "fish_parameter")?;

        let fishing_spot = row_ref(row, "fishing_spot")
            .map(|sid| self.fishing_spot(sid))
            .transpose()?;
        let entity = Arc::new(FishParameter {
            id,
            item_id: row_ref(row, "item").unwrap_or(0),
            text: row_str(row, "text"),
            ocean_stars: row_i64(row, "ocean_stars").unwrap_or(0),
            is_hidden: row_flag(row, "is_hidden"),
            is_in_log: row_flag(row, "is_in_log"),
            fishing_spot,
        });
        Ok(write(&self.fish_parameters).entry(id).or_insert(entity).clone())
    }

    pub fn fishing_spot(&self, id: u32) -> Result<Arc<FishingSpot>, LookupError> {
        if let Some(hit) = read(&self.fishing_spots).get(&id) {
            return Ok(hit.clone());
        }
        let row = fetch_row(
            self.store.fishing_spots(),
            id,
            EntityKind::FishingSpot,
            "fishing_spot",
        )?;
        require_field(
            row,
            "fishing_spot_category",
            id,
            EntityKind::FishingSpot,
            "fishing_spot",
        )?;

        let place_name = row_ref(row, "place_name")
            .map(|pid| self.place_name(pid))
            .transpose()?;
        let items = (0..10)
            .filter_map(|slot| row_ref(row, &format!("item{slot}")))
            .collect();
        let entity = Arc::new(FishingSpot {
            id,
            gathering_level: row_i64(row, "gathering_level").unwrap_or(0),
            big_fish_on_reach: row_str(row, "big_fish_on_reach"),
            big_fish_on_end: row_str(row, "big_fish_on_end"),
            category: coded(row, "fishing_spot_category"),
            rare: row_flag(row, "rare"),
            territory_type: row_i64(row, "territory_type").unwrap_or(0),
            x: row_i64(row, "x").unwrap_or(0),
            z: row_i64(row, "z").unwrap_or(0),
            radius: row_i64(row, "radius").unwrap_or(0),
            items,
            place_name,
        });
        Ok(write(&self.fishing_spots).entry(id).or_insert(entity).clone())
    }

    /// The spearfishing entry for an item, found through the inverse index.
    pub fn spearfishing_item_for(&self, item_id: u32) -> Result<Arc<SpearFishingItem>, LookupError> {
        let key = self
            .store
            .spearfishing_by_item()
            .row_key_of(&item_id.to_string())
            .ok_or_else(|| LookupError::NotFound {
                kind: EntityKind::SpearFishingItem,
                query: item_id.to_string(),
                field: "item",
                context: "spearfishing_item_for",
            })?;
        let id = parse_row_key(key, EntityKind::SpearFishingItem, "spearfishing_item_for")?;
        self.spearfishing_item(id)
    }

    pub fn spearfishing_item(&self, id: u32) -> Result<Arc<SpearFishingItem>, LookupError> {
        if let Some(hit) = read(&self.spearfishing_items).get(&id) {
            return Ok(hit.clone());
        }
        let row = fetch_row(
            self.store.spearfishing_items(),
            id,
            EntityKind::SpearFishingItem,
            "spearfishing_item",
        )?;
        require_field(
            row,
            "is_visible",
            id,
            EntityKind::SpearFishingItem,
            "spearfishing_item",
        )?;

        let territory_type = row_i64(row, "territory_type").unwrap_or(0);
        let notebook = self
            .notebook_for_territory(territory_type)
            .map(|nid| self.spearfishing_notebook(nid))
            .transpose()?;
        let entity = Arc::new(SpearFishingItem {
            id,
            item_id: row_ref(row, "item").unwrap_or(0),
            description: row_str(row, "description"),
            is_visible: row_flag(row, "is_visible"),
            territory_type,
            notebook,
        });
        Ok(write(&self.spearfishing_items)
            .entry(id)
            .or_insert(entity)
            .clone())
    }

    /// The notebook entry covering a territory, if any. Notebook rows are
    /// keyed by their own id, so this is a scan; the table is tiny.
    fn notebook_for_territory(&self, territory_type: i64) -> Option<u32> {
        if territory_type == 0 {
            return None;
        }
        for (key, row) in self.store.spearfishing_notebooks().iter() {
            if row_i64(row, "territory_type") == Some(territory_type) {
                return key.parse().ok();
            }
        }
        None
    }

    pub fn spearfishing_notebook(&self, id: u32) -> Result<Arc<SpearFishingNotebook>, LookupError> {
        if let Some(hit) = read(&self.spearfishing_notebooks).get(&id) {
            return Ok(hit.clone());
        }
        let row = fetch_row(
            self.store.spearfishing_notebooks(),
            id,
            EntityKind::SpearFishingNotebook,
            "spearfishing_notebook",
        )?;
        require_field(
            row,
            "territory_type",
            id,
            EntityKind::SpearFishingNotebook,
            "spearfishing_notebook",
        )?;

        let place_name = row_ref(row, "place_name")
            .map(|pid| self.place_name(pid))
            .transpose()?;
        let entity = Arc::new(SpearFishingNotebook {
            id,
            gathering_level: row_i64(row, "gathering_level").unwrap_or(0),
            is_shadow_node: row_flag(row, "is_shadow_node"),
            territory_type: row_i64(row, "territory_type").unwrap_or(0),
            x: row_i64(row, "x").unwrap_or(0),
            y: row_i64(row, "y").unwrap_or(0),
            radius: row_i64(row, "radius").unwrap_or(0),
            place_name,
        });
        Ok(write(&self.spearfishing_notebooks)
            .entry(id)
            .or_insert(entity)
            .clone())
    }

    pub fn place_name(&self, id: u32) -> Result<Arc<PlaceName>, LookupError> {
        if let Some(hit) = read(&self.place_names).get(&id) {
            return Ok(hit.clone());
        }
        let row = fetch_row(
            self.store.place_names(),
            id,
            EntityKind::PlaceName,
            "place_name",
        )?;
        let name = row_str(row, "name").ok_or_else(|| LookupError::ShapeMismatch {
            kind: EntityKind::PlaceName,
            query: id.to_string(),
            field: "name",
            context: "place_name",
        })?;

        let entity = Arc::new(PlaceName {
            id,
            name,
            name_no_article: row_str(row, "name_no_article"),
        });
        Ok(write(&self.place_names).entry(id).or_insert(entity).clone())
    }

    /// The number of items currently held in the item cache.
    pub fn cached_items(&self) -> usize {
        read(&self.items).len()
    }
}

fn parse_row_key(
    key: &str,
    kind: EntityKind,
    context: &'static str,
) -> Result<u32, LookupError> {
    key.parse().map_err(|_| LookupError::ShapeMismatch {
        kind,
        query: key.to_string(),
        field: "id",
        context,
    })
}
