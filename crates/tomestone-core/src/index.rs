//! Field indexes over a sanitized table.
//!
//! An index projects one field out of every row: the forward map goes
//! row-key -> rendered field value, the optional inverse map goes rendered
//! field value -> row-key. Values are stored in canonical text form so a
//! numeric id and a name index share one shape.

use crate::table::RawTable;
use std::collections::HashMap;

/// A forward (and optionally inverse) projection of one field.
#[derive(Debug, Clone, Default)]
pub struct TableIndex {
    forward: HashMap<String, String>,
    inverse: Option<HashMap<String, String>>,
}

impl TableIndex {
    /// Build an index over `field`. Rows missing the field are skipped.
    ///
    /// With `with_inverse`, the value -> row-key map is built alongside;
    /// when two rows render the same value the later-visited row wins.
    pub fn build(table: &RawTable, field: &str, with_inverse: bool) -> TableIndex {
        let mut forward = HashMap::with_capacity(table.len());
        let mut inverse = with_inverse.then(|| HashMap::with_capacity(table.len()));
        for (row_key, row) in table.iter() {
            let Some(value) = row.get(field) else {
                continue;
            };
            let rendered = value.render();
            if let Some(inv) = inverse.as_mut() {
                if let Some(prev) = inv.insert(rendered.clone(), row_key.clone()) {
                    log::debug!(
                        "index '{field}': value '{rendered}' maps to both rows {prev} and {row_key}, keeping {row_key}"
                    );
                }
            }
            forward.insert(row_key.clone(), rendered);
        }
        TableIndex { forward, inverse }
    }

    /// The rendered field value for a row key.
    pub fn value_of(&self, row_key: &str) -> Option<&str> {
        self.forward.get(row_key).map(String::as_str)
    }

    /// The row key holding a rendered field value. Requires the inverse map.
    pub fn row_key_of(&self, value: &str) -> Option<&str> {
        self.inverse.as_ref()?.get(value).map(String::as_str)
    }

    pub fn contains_row(&self, row_key: &str) -> bool {
        self.forward.contains_key(row_key)
    }

    /// Iterate (row-key, rendered value) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.forward.iter()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn has_inverse(&self) -> bool {
        self.inverse.is_some()
    }
}
