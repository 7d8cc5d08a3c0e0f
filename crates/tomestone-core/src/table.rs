//! Raw table parsing: delimited text in, sanitized typed rows out.
//!
//! Upstream tables are comma-separated with RFC-4180-style quoting (fields
//! may contain commas, doubled quotes, and embedded newlines). The first
//! record carries column indices and is discarded, the second carries field
//! names, the third per-field type tags, and the fourth is the all-zero
//! placeholder row; every remaining record is a data row keyed by its first
//! field.

use crate::sanitize::{self, TypeTag};
use crate::value::CellValue;
use serde::Serialize;
use std::collections::HashMap;

/// One sanitized data row: normalized field name -> coerced value. Fields
/// whose cells were empty are absent from the map.
pub type Row = HashMap<String, CellValue>;

/// Field names dropped from every row: unused or duplicate marker columns.
const REJECTED_FIELDS: &[&str] = &["#", "", "Model{Sub}", "Model{Main}"];

/// Errors produced while parsing one raw table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text ends before the discard/header/type-tag records.
    #[error("table is truncated: missing header or type-tag record")]
    Truncated,

    /// A record's column count does not match the header.
    ///
    /// Malformed rows abort the parse; no partially-built table is returned.
    #[error("record at line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A data row's first field (the row key) is empty.
    #[error("record at line {line}: empty row key")]
    EmptyRowKey { line: usize },

    /// A quoted field is still open at end of input.
    #[error("unterminated quoted field starting at line {line}")]
    UnterminatedQuote { line: usize },
}

/// Options controlling how one table is sanitized.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Rename the `#` identifier column to `id` and keep it in every row.
    /// When off, the identifier column is dropped from rows (the row key
    /// still carries it).
    pub rename_id: bool,
    /// Run field names through full normalization. Turned off when
    /// generating raw reference-schema artifacts, which need the sanitized
    /// but otherwise untouched names.
    pub format_keys: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            rename_id: true,
            format_keys: true,
        }
    }
}

/// One sanitized table: row-key -> row, plus the ordered normalized field
/// names and type tags from the header records. Immutable after parse.
#[derive(Debug, Clone, Serialize)]
pub struct RawTable {
    rows: HashMap<String, Row>,
    field_names: Vec<String>,
    type_tags: Vec<TypeTag>,
}

impl RawTable {
    /// Parse and sanitize one raw table.
    pub fn parse(text: &str, opts: ParseOptions) -> Result<RawTable, ParseError> {
        let records = read_records(text)?;
        if records.len() < 3 {
            return Err(ParseError::Truncated);
        }

        // Record 0 is the column-index record; records 1 and 2 are the
        // field names and type tags.
        let (_, header) = &records[1];
        let (_, tags) = &records[2];
        let expected = header.len();

        for (line, fields) in &records {
            if fields.len() != expected {
                return Err(ParseError::ColumnCount {
                    line: *line,
                    expected,
                    found: fields.len(),
                });
            }
        }

        let field_names: Vec<String> = if opts.format_keys {
            header.iter().map(|k| sanitize::normalize_key(k)).collect()
        } else {
            header.iter().map(|k| sanitize::sanitize_key(k)).collect()
        };
        let type_tags: Vec<TypeTag> = tags
            .iter()
            .map(|t| sanitize::normalize_type_tag(t))
            .collect();

        // Record 3 is the all-zero placeholder row; data starts at record 4.
        let mut rows: HashMap<String, Row> = HashMap::new();
        for (line, fields) in records.iter().skip(4) {
            let row_key = fields[0].clone();
            if row_key.is_empty() {
                return Err(ParseError::EmptyRowKey { line: *line });
            }
            let mut row: Row = HashMap::new();
            for (raw_key, raw_value) in header.iter().zip(fields.iter()) {
                let key = if raw_key == "#" && opts.rename_id {
                    "id".to_string()
                } else if REJECTED_FIELDS.contains(&raw_key.as_str()) {
                    continue;
                } else if opts.format_keys {
                    sanitize::normalize_key(raw_key)
                } else {
                    sanitize::sanitize_key(raw_key)
                };
                let value = sanitize::sanitize_value(raw_value);
                if let Some(cell) = CellValue::coerce(&value) {
                    row.insert(key, cell);
                }
            }
            if rows.insert(row_key.clone(), row).is_some() {
                log::debug!("duplicate row key '{row_key}', keeping the later row");
            }
        }

        Ok(RawTable {
            rows,
            field_names,
            type_tags,
        })
    }

    /// Fetch one row by its row key.
    pub fn get(&self, row_key: &str) -> Option<&Row> {
        self.rows.get(row_key)
    }

    /// Iterate all (row-key, row) pairs. Iteration order is not guaranteed
    /// to be stable across rebuilds.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Row)> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The ordered, normalized field names from the header record,
    /// including rejected and identifier columns.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// The ordered, normalized type tags from the type record.
    pub fn type_tags(&self) -> &[TypeTag] {
        &self.type_tags
    }

    /// Serialize the sanitized rows as pretty-printed JSON, mirroring the
    /// row-key -> row layout.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.rows)
    }
}

/// Split delimited text into records of fields, honoring RFC-4180 quoting:
/// a field wrapped in double quotes may contain commas, doubled quotes, and
/// newlines. Returns each record with the 1-based line it started on.
pub fn read_records(text: &str) -> Result<Vec<(usize, Vec<String>)>, ParseError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut record_line = 1usize;
    let mut record_started = false;
    let mut quote_line = 1usize;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                quote_line = line;
                record_started = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                record_started = true;
            }
            '\r' => {
                // Swallowed; the newline that follows ends the record.
            }
            '\n' => {
                if record_started || !field.is_empty() || !fields.is_empty() {
                    fields.push(std::mem::take(&mut field));
                    records.push((record_line, std::mem::take(&mut fields)));
                }
                line += 1;
                record_line = line;
                record_started = false;
            }
            _ => {
                field.push(c);
                record_started = true;
            }
        }
    }
    if in_quotes {
        return Err(ParseError::UnterminatedQuote { line: quote_line });
    }
    if record_started || !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push((record_line, fields));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
key,0,1,2\n\
#,Name,Level{Item},IsUnique\n\
int32,str,uint16,bit&01\n\
0,\"\",0,False\n\
1,\"Cryptomeria Log\",12,False\n\
2,\"Log, Split\",13,True\n";

    #[test]
    fn parses_header_and_rows() {
        let table = RawTable::parse(FIXTURE, ParseOptions::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.field_names(),
            &["#", "name", "level_item", "is_unique"]
        );
        assert_eq!(
            table.type_tags(),
            &[
                TypeTag::Integer,
                TypeTag::Str,
                TypeTag::Integer,
                TypeTag::Boolean
            ]
        );
    }

    #[test]
    fn identifier_column_renamed_to_id() {
        let table = RawTable::parse(FIXTURE, ParseOptions::default()).unwrap();
        let row = table.get("1").unwrap();
        assert_eq!(row.get("id"), Some(&CellValue::Int(1)));
        assert_eq!(
            row.get("name"),
            Some(&CellValue::Str("Cryptomeria Log".to_string()))
        );
        assert_eq!(row.get("level_item"), Some(&CellValue::Int(12)));
        assert_eq!(row.get("is_unique"), Some(&CellValue::Bool(false)));
    }

    #[test]
    fn identifier_column_dropped_when_not_renamed() {
        let opts = ParseOptions {
            rename_id: false,
            ..ParseOptions::default()
        };
        let table = RawTable::parse(FIXTURE, opts).unwrap();
        let row = table.get("1").unwrap();
        assert!(!row.contains_key("id"));
        assert!(!row.contains_key("#"));
        assert!(row.contains_key("name"));
    }

    #[test]
    fn format_keys_off_sanitizes_without_snake_casing() {
        let opts = ParseOptions {
            format_keys: false,
            ..ParseOptions::default()
        };
        let table = RawTable::parse(FIXTURE, opts).unwrap();
        assert_eq!(table.field_names(), &["#", "Name", "LevelItem", "IsUnique"]);
        assert!(table.get("1").unwrap().contains_key("LevelItem"));
    }

    #[test]
    fn quoted_comma_stays_in_field() {
        let table = RawTable::parse(FIXTURE, ParseOptions::default()).unwrap();
        let row = table.get("2").unwrap();
        assert_eq!(
            row.get("name"),
            Some(&CellValue::Str("Log, Split".to_string()))
        );
    }

    #[test]
    fn placeholder_row_is_discarded() {
        let table = RawTable::parse(FIXTURE, ParseOptions::default()).unwrap();
        assert!(table.get("0").is_none());
    }

    #[test]
    fn wrong_column_count_is_a_parse_error() {
        let bad = "\
key,0,1\n\
#,Name,Level{Item}\n\
int32,str,uint16\n\
0,,0\n\
1,Cryptomeria Log\n";
        let err = RawTable::parse(bad, ParseOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::ColumnCount {
                line: 5,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn truncated_table_is_a_parse_error() {
        let err = RawTable::parse("key,0\n#,Name\n", ParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseError::Truncated);
    }

    #[test]
    fn unterminated_quote_is_a_parse_error() {
        let bad = "key,0\n#,Name\nint32,str\n0,\n1,\"open";
        let err = RawTable::parse(bad, ParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseError::UnterminatedQuote { line: 5 });
    }

    #[test]
    fn embedded_newline_in_quoted_field() {
        let text = "\
key,0,1\n\
#,Description,Name\n\
int32,str,str\n\
0,,\n\
7,\"Two\nlines.\",Widget\n\
8,,Gadget\n";
        let table = RawTable::parse(text, ParseOptions::default()).unwrap();
        assert_eq!(
            table.get("7").unwrap().get("description"),
            Some(&CellValue::Str("Two\nlines.".to_string()))
        );
        // Line accounting survives the embedded newline.
        assert_eq!(table.get("8").unwrap().get("name"),
            Some(&CellValue::Str("Gadget".to_string())));
    }

    #[test]
    fn doubled_quotes_unescape() {
        let text = "\
key,0\n\
#,Name\n\
int32,str\n\
0,\n\
3,\"He said \"\"hi\"\"\"\n";
        let table = RawTable::parse(text, ParseOptions::default()).unwrap();
        assert_eq!(
            table.get("3").unwrap().get("name"),
            Some(&CellValue::Str("He said \"hi\"".to_string()))
        );
    }

    #[test]
    fn empty_cells_are_absent() {
        let table = RawTable::parse(FIXTURE, ParseOptions::default()).unwrap();
        // Row 2's name is present but row keys map only non-empty cells.
        let text = "\
key,0,1\n\
#,Name,Description\n\
int32,str,str\n\
0,,\n\
4,Thing,\n";
        let table2 = RawTable::parse(text, ParseOptions::default()).unwrap();
        assert!(!table2.get("4").unwrap().contains_key("description"));
        assert!(table.get("1").unwrap().contains_key("name"));
    }

    #[test]
    fn rejected_columns_are_dropped() {
        let text = "\
key,0,1,2\n\
#,Name,Model{Main},Model{Sub}\n\
int32,str,int64,int64\n\
0,,0,0\n\
5,Blade,123,456\n";
        let table = RawTable::parse(text, ParseOptions::default()).unwrap();
        let row = table.get("5").unwrap();
        assert_eq!(row.len(), 2); // id + name
        assert!(!row.contains_key("model_main"));
        assert!(!row.contains_key("model_sub"));
    }

    #[test]
    fn markup_is_stripped_before_coercion() {
        let text = "\
key,0\n\
#,Name\n\
int32,str\n\
0,\n\
6,<Emphasis>Rarefied</Emphasis> Log\n";
        let table = RawTable::parse(text, ParseOptions::default()).unwrap();
        assert_eq!(
            table.get("6").unwrap().get("name"),
            Some(&CellValue::Str("Rarefied Log".to_string()))
        );
    }

    #[test]
    fn to_json_round_trips_rows() {
        let table = RawTable::parse(FIXTURE, ParseOptions::default()).unwrap();
        let json = table.to_json().unwrap();
        let back: HashMap<String, Row> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back["1"]["level_item"], CellValue::Int(12));
    }
}
