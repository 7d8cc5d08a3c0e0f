//! Typed entities, resolution, and search over a built table store.
//!
//! [`Catalog`] wraps a `tomestone_core::TableStore` and resolves rows into
//! `Arc`-shared entities on demand, caching per kind. On top of that sit
//! approximate name search ([`search`]), inventory-export parsing
//! ([`inventory`]), and optional market/catch-data attachment
//! ([`aux_data`]).

pub mod aux_data;
pub mod catalog;
pub mod entity;
pub mod enums;
pub mod error;
pub mod inventory;
pub mod search;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use aux_data::{CatchStats, MarketSnapshot};
pub use catalog::Catalog;
pub use entity::{
    FishParameter, FishingSpot, GatheringItem, GatheringItemLevel, Ingredient, InventoryItem,
    Item, JobRecipe, PlaceName, Recipe, RecipeLevel, SpearFishingItem, SpearFishingNotebook,
};
pub use enums::{
    Coded, CraftType, EquipSlotCategory, FishingSpotCategory, InventoryLocation, ItemQuality,
    ItemUiCategory,
};
pub use error::{EntityKind, LookupError};
pub use inventory::InventoryOptions;
pub use search::{partial_ratio, SearchOptions};
