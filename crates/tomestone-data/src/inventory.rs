//! Inventory-export parsing.
//!
//! Takes the CSV an inventory-tracking addon exports (header
//! `Favorite?,Icon,Name,Type,Total Quantity Available,Source,Inventory
//! Location`) and ties each line back to a resolved item by
//! high-confidence name search. Lines that cannot be matched are logged
//! and skipped rather than failing the whole import.

use crate::entity::InventoryItem;
use crate::enums::{InventoryLocation, ItemQuality};
use crate::search::SearchOptions;
use crate::Catalog;
use tomestone_core::table::{read_records, ParseError};

/// Knobs for one inventory import.
#[derive(Debug, Clone)]
pub struct InventoryOptions {
    /// Inventory locations whose lines are dropped. The default skips
    /// everything that is not a personal bag or saddlebag.
    pub skip_locations: Vec<InventoryLocation>,
}

impl Default for InventoryOptions {
    fn default() -> Self {
        InventoryOptions {
            skip_locations: vec![
                InventoryLocation::FreeCompany,
                InventoryLocation::Currency,
                InventoryLocation::Crystals,
                InventoryLocation::GlamourChest,
                InventoryLocation::Market,
                InventoryLocation::Armoire,
                InventoryLocation::Armory,
                InventoryLocation::EquippedGear,
            ],
        }
    }
}

/// Export location labels, longest prefix first so "Premium Saddlebag Left"
/// is not claimed by "Saddlebag Left".
const LOCATION_PREFIXES: &[(&str, InventoryLocation)] = &[
    ("Premium Saddlebag Left", InventoryLocation::PremiumSaddlebagLeft),
    ("Premium Saddlebag Right", InventoryLocation::PremiumSaddlebagRight),
    ("Saddlebag Left", InventoryLocation::SaddlebagLeft),
    ("Saddlebag Right", InventoryLocation::SaddlebagRight),
    ("Free Company", InventoryLocation::FreeCompany),
    ("Glamour Chest", InventoryLocation::GlamourChest),
    ("Equipped Gear", InventoryLocation::EquippedGear),
    ("Armory", InventoryLocation::Armory),
    ("Crystals", InventoryLocation::Crystals),
    ("Currency", InventoryLocation::Currency),
    ("Armoire", InventoryLocation::Armoire),
    ("Market", InventoryLocation::Market),
    ("Bag", InventoryLocation::Bag),
];

fn location_from_label(label: &str) -> InventoryLocation {
    for (prefix, location) in LOCATION_PREFIXES {
        if label.starts_with(prefix) {
            return *location;
        }
    }
    log::warn!("unrecognized inventory location '{label}'");
    InventoryLocation::Null
}

fn parse_quantity(raw: &str) -> i64 {
    raw.replace(',', "").trim().parse().unwrap_or(0)
}

impl Catalog {
    /// Parse an inventory export against this catalog.
    ///
    /// Item names are matched at similarity 95 with a single result, so
    /// minor punctuation drift in the export still matches but unrelated
    /// items do not. Unmatched names, skipped locations, and the
    /// free-company-credits pseudo-item are dropped with a log line.
    pub fn parse_inventory(
        &self,
        text: &str,
        opts: &InventoryOptions,
    ) -> Result<Vec<InventoryItem>, ParseError> {
        let records = read_records(text)?;
        let mut inventory = Vec::new();
        // First record is the export's header.
        for (line, fields) in records.iter().skip(1) {
            if fields.len() < 7 {
                log::warn!("inventory line {line}: {} fields, expected 7", fields.len());
                continue;
            }
            let name = fields[2].trim();
            if name.is_empty() || name.eq_ignore_ascii_case("free company credits") {
                continue;
            }
            let location = location_from_label(fields[6].trim());
            if opts.skip_locations.contains(&location) {
                log::debug!("inventory line {line}: skipping location {location:?}");
                continue;
            }
            let search = SearchOptions {
                threshold: 95,
                limit: 1,
            };
            let item = match self.search_items(name, search) {
                Ok(mut hits) => hits.remove(0),
                Err(err) => {
                    log::warn!("inventory line {line}: no item for '{name}': {err}");
                    continue;
                }
            };
            let quality = if fields[3].trim().eq_ignore_ascii_case("hq") {
                ItemQuality::Hq
            } else {
                ItemQuality::Nq
            };
            inventory.push(InventoryItem {
                item,
                quality,
                quantity: parse_quantity(&fields[4]),
                location,
                source: fields[5].trim().to_string(),
                favourite: fields[0].trim().eq_ignore_ascii_case("true"),
            });
        }
        Ok(inventory)
    }
}
