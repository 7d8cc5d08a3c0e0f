//! Resolved entity types.
//!
//! Entities are value objects built once from a raw row and shared behind
//! `Arc`. Identity, equality, ordering, and hashing all follow the numeric
//! identifier alone; two builds of the same row compare equal even though
//! they are distinct allocations.

use crate::enums::{
    Coded, CraftType, EquipSlotCategory, FishingSpotCategory, InventoryLocation, ItemQuality,
    ItemUiCategory,
};
use std::sync::Arc;

/// Implement equality, ordering, and hashing by the named identifier field.
macro_rules! identity_by {
    ($($ty:ident . $field:ident),+ $(,)?) => {$(
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.$field == other.$field
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.$field.hash(state);
            }
        }

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.$field.cmp(&other.$field)
            }
        }
    )+};
}

/// A tradable or craftable item, with its acquisition routes resolved where
/// the source tables reference them.
#[derive(Debug, Clone)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub level_item: i64,
    pub level_equip: i64,
    pub rarity: i64,
    pub stack_size: i64,
    pub price_mid: i64,
    pub price_low: i64,
    pub is_unique: bool,
    pub is_untradable: bool,
    pub is_collectable: bool,
    pub can_be_hq: bool,
    pub item_ui_category: Coded<ItemUiCategory>,
    pub equip_slot_category: Coded<EquipSlotCategory>,
    /// Per-job crafting recipes producing this item, when any exist.
    pub recipes: Option<Arc<JobRecipe>>,
    /// Gathering entry for this item, when it can be gathered.
    pub gathering: Option<Arc<GatheringItem>>,
    /// Fish parameter entry, when this item is a catchable fish.
    pub fishing: Option<Arc<FishParameter>>,
    /// Spearfishing entry, when this item is speared rather than hooked.
    pub spearfishing: Option<Arc<SpearFishingItem>>,
}

/// The per-job recipe row for one result item: one optional recipe per
/// crafting discipline.
#[derive(Debug, Clone)]
pub struct JobRecipe {
    pub item_id: u32,
    pub carpenter: Option<Arc<Recipe>>,
    pub blacksmith: Option<Arc<Recipe>>,
    pub armorer: Option<Arc<Recipe>>,
    pub goldsmith: Option<Arc<Recipe>>,
    pub leatherworker: Option<Arc<Recipe>>,
    pub weaver: Option<Arc<Recipe>>,
    pub alchemist: Option<Arc<Recipe>>,
    pub culinarian: Option<Arc<Recipe>>,
}

impl JobRecipe {
    /// Iterate the recipes that exist, in discipline order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Recipe>> {
        [
            &self.carpenter,
            &self.blacksmith,
            &self.armorer,
            &self.goldsmith,
            &self.leatherworker,
            &self.weaver,
            &self.alchemist,
            &self.culinarian,
        ]
        .into_iter()
        .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// One ingredient line of a recipe. Ingredients stay raw identifier/amount
/// pairs; resolving them into `Item`s would recurse through
/// item -> recipe -> ingredient item without bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ingredient {
    pub item_id: u32,
    pub amount: i64,
}

#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: u32,
    pub craft_type: Coded<CraftType>,
    pub recipe_level: Option<Arc<RecipeLevel>>,
    /// The produced item's identifier. Validated against the item table but
    /// kept as an identifier for the same reason ingredients are.
    pub item_result: u32,
    pub amount_result: i64,
    pub ingredients: Vec<Ingredient>,
    pub can_quick_synth: bool,
    pub can_hq: bool,
    pub is_expert: bool,
    pub required_craftsmanship: i64,
    pub required_control: i64,
    pub difficulty_factor: i64,
    pub quality_factor: i64,
    pub durability_factor: i64,
}

#[derive(Debug, Clone)]
pub struct RecipeLevel {
    pub id: u32,
    pub class_job_level: i64,
    pub stars: i64,
    pub suggested_craftsmanship: i64,
    pub difficulty: i64,
    pub quality: i64,
    pub progress_divider: i64,
    pub quality_divider: i64,
    pub progress_modifier: i64,
    pub quality_modifier: i64,
    pub durability: i64,
}

#[derive(Debug, Clone)]
pub struct GatheringItem {
    pub id: u32,
    pub item_id: u32,
    pub level: Option<Arc<GatheringItemLevel>>,
    pub quest: bool,
    pub is_hidden: bool,
}

#[derive(Debug, Clone)]
pub struct GatheringItemLevel {
    pub id: u32,
    pub level: i64,
    pub stars: i64,
}

#[derive(Debug, Clone)]
pub struct FishParameter {
    pub id: u32,
    pub item_id: u32,
    pub text: Option<String>,
    pub ocean_stars: i64,
    pub is_hidden: bool,
    pub is_in_log: bool,
    pub fishing_spot: Option<Arc<FishingSpot>>,
}

#[derive(Debug, Clone)]
pub struct FishingSpot {
    pub id: u32,
    pub gathering_level: i64,
    pub big_fish_on_reach: Option<String>,
    pub big_fish_on_end: Option<String>,
    pub category: Coded<FishingSpotCategory>,
    pub rare: bool,
    pub territory_type: i64,
    pub x: i64,
    pub z: i64,
    pub radius: i64,
    /// Item identifiers catchable at this spot (`item0` .. `item9`, zeros
    /// dropped).
    pub items: Vec<u32>,
    pub place_name: Option<Arc<PlaceName>>,
}

#[derive(Debug, Clone)]
pub struct SpearFishingItem {
    pub id: u32,
    pub item_id: u32,
    pub description: Option<String>,
    pub is_visible: bool,
    pub territory_type: i64,
    /// The notebook entry covering this item's territory, when one exists.
    pub notebook: Option<Arc<SpearFishingNotebook>>,
}

#[derive(Debug, Clone)]
pub struct SpearFishingNotebook {
    pub id: u32,
    pub gathering_level: i64,
    pub is_shadow_node: bool,
    pub territory_type: i64,
    pub x: i64,
    pub y: i64,
    pub radius: i64,
    pub place_name: Option<Arc<PlaceName>>,
}

#[derive(Debug, Clone)]
pub struct PlaceName {
    pub id: u32,
    pub name: String,
    pub name_no_article: Option<String>,
}

/// One line of a parsed inventory export, tied back to a resolved item.
#[derive(Debug, Clone)]
pub struct InventoryItem {
    pub item: Arc<Item>,
    pub quality: ItemQuality,
    pub quantity: i64,
    pub location: InventoryLocation,
    pub source: String,
    pub favourite: bool,
}

identity_by! {
    Item.id,
    JobRecipe.item_id,
    Recipe.id,
    RecipeLevel.id,
    GatheringItem.id,
    GatheringItemLevel.id,
    FishParameter.id,
    FishingSpot.id,
    SpearFishingItem.id,
    SpearFishingNotebook.id,
    PlaceName.id,
}
