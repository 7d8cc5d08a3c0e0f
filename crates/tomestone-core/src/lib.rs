//! Core table machinery: sanitization, typed cells, parsing, indexing, and
//! the immutable table store.
//!
//! The pipeline runs in one direction: raw dataset text enters a
//! [`TableSet`], [`TableStore::build`] parses and sanitizes every table
//! (see [`table`] and [`sanitize`]), coerces cells into typed values
//! ([`value`]), and raises the standing field indexes ([`index`]). The
//! resulting store is immutable; entity resolution and search live in the
//! `tomestone-data` crate on top of it.

pub mod index;
pub mod sanitize;
pub mod schema;
pub mod source;
pub mod store;
pub mod table;
pub mod value;

pub use index::TableIndex;
pub use source::{DATASETS, TableSet};
pub use store::{BuildError, TableStore};
pub use table::{ParseError, ParseOptions, RawTable, Row};
pub use value::CellValue;
