//! Approximate name search over the name-indexed tables.
//!
//! A query resolves in stages: numeric text is treated as an id; otherwise
//! an exact name match is tried (case-sensitive, then case-insensitive);
//! otherwise every known name is scored with a partial-similarity metric and
//! candidates at or above the threshold are resolved and returned.

use crate::entity::{Item, PlaceName};
use crate::error::{EntityKind, LookupError};
use crate::Catalog;
use std::sync::Arc;
use tomestone_core::TableIndex;

/// Threshold and result-count knobs for one search.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct SearchOptions {
    /// Minimum partial-similarity score (0..=100) a candidate must reach.
    pub threshold: u8,
    /// Maximum number of results returned.
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            threshold: 80,
            limit: 10,
        }
    }
}

/// Partial-similarity score between two strings, 0..=100.
///
/// Case-insensitive. The shorter string is slid across the longer one and
/// the best window's normalized Levenshtein similarity is taken, so a query
/// that appears verbatim inside a longer name scores 100.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (&a, &b)
    } else {
        (&b, &a)
    };
    if short.is_empty() {
        return 0;
    }
    if long.contains(short.as_str()) {
        return 100;
    }
    let window_len = short.chars().count();
    let long_chars: Vec<char> = long.chars().collect();
    let mut best = 0.0f64;
    for window in long_chars.windows(window_len) {
        let window: String = window.iter().collect();
        let score = strsim::normalized_levenshtein(short, &window);
        if score > best {
            best = score;
        }
    }
    (best * 100.0).round() as u8
}

fn search_index<T, F>(
    kind: EntityKind,
    index: &TableIndex,
    query: &str,
    opts: SearchOptions,
    mut resolve: F,
) -> Result<Vec<Arc<T>>, LookupError>
where
    F: FnMut(u32) -> Result<Arc<T>, LookupError>,
{
    // Numeric queries are id lookups, not name searches.
    if let Ok(id) = query.trim().parse::<u32>() {
        return Ok(vec![resolve(id)?]);
    }

    if let Some(key) = index.row_key_of(query) {
        if let Ok(id) = key.parse() {
            return Ok(vec![resolve(id)?]);
        }
    }
    for (key, name) in index.iter() {
        if name.eq_ignore_ascii_case(query) {
            if let Ok(id) = key.parse() {
                return Ok(vec![resolve(id)?]);
            }
        }
    }

    log::debug!("fuzzy {kind} search for '{query}' (threshold {})", opts.threshold);
    let mut results = Vec::new();
    for (key, name) in index.iter() {
        if partial_ratio(query, name) < opts.threshold {
            continue;
        }
        let Ok(id) = key.parse::<u32>() else {
            continue;
        };
        match resolve(id) {
            Ok(entity) => {
                results.push(entity);
                if results.len() >= opts.limit {
                    break;
                }
            }
            // A candidate that fails to resolve is dropped from the result
            // set rather than failing the whole search.
            Err(err) => log::warn!("search candidate '{name}' failed to resolve: {err}"),
        }
    }
    if results.is_empty() {
        return Err(LookupError::NoMatch {
            kind,
            query: query.to_string(),
            threshold: opts.threshold,
        });
    }
    Ok(results)
}

impl Catalog {
    /// Search the item table by id or approximate name.
    pub fn search_items(
        &self,
        query: &str,
        opts: SearchOptions,
    ) -> Result<Vec<Arc<Item>>, LookupError> {
        search_index(
            EntityKind::Item,
            self.store().item_names(),
            query,
            opts,
            |id| self.item(id),
        )
    }

    /// Search the place-name table by id or approximate name.
    pub fn search_place_names(
        &self,
        query: &str,
        opts: SearchOptions,
    ) -> Result<Vec<Arc<PlaceName>>, LookupError> {
        search_index(
            EntityKind::PlaceName,
            self.store().place_name_index(),
            query,
            opts,
            |id| self.place_name(id),
        )
    }
}
