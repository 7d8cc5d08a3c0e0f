//! Externally computed per-item data attached after resolution.
//!
//! Market snapshots and catch statistics come from outside the datasets
//! (price aggregators, fishing logs). They hang off the catalog in side
//! tables keyed by item id and are never required for entity construction.

use crate::Catalog;
use serde::{Deserialize, Serialize};

/// A point-in-time market summary for one item on one world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub item_id: u32,
    pub world: String,
    pub min_price_nq: i64,
    pub min_price_hq: i64,
    pub average_price: f64,
    pub sale_velocity: f64,
    pub listing_count: usize,
}

/// Aggregated catch statistics for one fish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchStats {
    pub item_id: u32,
    pub best_bait: String,
    pub bite_time_min_seconds: u32,
    pub bite_time_max_seconds: u32,
    pub catch_percent: f64,
}

impl Catalog {
    /// Attach (or replace) a market snapshot for an item.
    pub fn attach_market(&self, snapshot: MarketSnapshot) {
        let mut table = self.market.write().unwrap_or_else(|e| e.into_inner());
        table.insert(snapshot.item_id, snapshot);
    }

    /// The most recently attached market snapshot for an item.
    pub fn market_for(&self, item_id: u32) -> Option<MarketSnapshot> {
        let table = self.market.read().unwrap_or_else(|e| e.into_inner());
        table.get(&item_id).cloned()
    }

    /// Attach (or replace) catch statistics for a fish.
    pub fn attach_catch_stats(&self, stats: CatchStats) {
        let mut table = self.catch_stats.write().unwrap_or_else(|e| e.into_inner());
        table.insert(stats.item_id, stats);
    }

    /// The most recently attached catch statistics for a fish.
    pub fn catch_stats_for(&self, item_id: u32) -> Option<CatchStats> {
        let table = self.catch_stats.read().unwrap_or_else(|e| e.into_inner());
        table.get(&item_id).cloned()
    }
}
