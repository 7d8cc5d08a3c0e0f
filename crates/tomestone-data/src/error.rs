//! Lookup errors raised by entity resolution and search.

use std::fmt;

/// The entity kinds a resolver can be asked for. Carried in every lookup
/// error so callers can tell which stage of a nested resolution failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Item,
    Recipe,
    JobRecipe,
    RecipeLevel,
    GatheringItem,
    GatheringItemLevel,
    FishParameter,
    FishingSpot,
    SpearFishingItem,
    SpearFishingNotebook,
    PlaceName,
    InventoryItem,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Item => "item",
            EntityKind::Recipe => "recipe",
            EntityKind::JobRecipe => "job recipe",
            EntityKind::RecipeLevel => "recipe level",
            EntityKind::GatheringItem => "gathering item",
            EntityKind::GatheringItemLevel => "gathering item level",
            EntityKind::FishParameter => "fish parameter",
            EntityKind::FishingSpot => "fishing spot",
            EntityKind::SpearFishingItem => "spearfishing item",
            EntityKind::SpearFishingNotebook => "spearfishing notebook",
            EntityKind::PlaceName => "place name",
            EntityKind::InventoryItem => "inventory item",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed entity lookup. `field` names the column involved and `context`
/// the resolver that was running, so errors surfacing from deep in a nested
/// resolution still say where they came from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No row answers the query.
    #[error("{kind} lookup in {context}: no row for '{query}' via '{field}'")]
    NotFound {
        kind: EntityKind,
        query: String,
        field: &'static str,
        context: &'static str,
    },

    /// A row exists but is missing (or mistypes) a field the entity needs.
    #[error("{kind} row '{query}' in {context}: field '{field}' is missing or mistyped")]
    ShapeMismatch {
        kind: EntityKind,
        query: String,
        field: &'static str,
        context: &'static str,
    },

    /// A search found nothing at or above the similarity threshold.
    #[error("no {kind} matched '{query}' at similarity threshold {threshold}")]
    NoMatch {
        kind: EntityKind,
        query: String,
        threshold: u8,
    },
}

impl LookupError {
    pub fn kind(&self) -> EntityKind {
        match self {
            LookupError::NotFound { kind, .. }
            | LookupError::ShapeMismatch { kind, .. }
            | LookupError::NoMatch { kind, .. } => *kind,
        }
    }
}
