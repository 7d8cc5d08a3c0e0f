//! Reference-schema artifacts rendered from table headers.
//!
//! These are developer aids, not compiled code: given a table's field names
//! and type tags, render the Rust struct (or enum) a typed binding for that
//! table would look like. The output is written to a scratch file and
//! eyeballed when a new upstream table shows up.

use crate::sanitize::{self, TypeTag};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The field-name and type-tag records disagree on column count.
    #[error("schema '{name}': {fields} field names but {tags} type tags")]
    LengthMismatch {
        name: String,
        fields: usize,
        tags: usize,
    },
}

/// Render a struct definition for one table's columns.
///
/// The identifier column renders as `id`, empty field names are skipped,
/// and columns with unrecognized type tags render as comments carrying the
/// original tag text.
pub fn render_row_struct(
    name: &str,
    field_names: &[String],
    type_tags: &[TypeTag],
) -> Result<String, SchemaError> {
    if field_names.len() != type_tags.len() {
        return Err(SchemaError::LengthMismatch {
            name: name.to_string(),
            fields: field_names.len(),
            tags: type_tags.len(),
        });
    }
    let mut out = String::new();
    let _ = writeln!(out, "#[derive(Debug, Clone)]");
    let _ = writeln!(out, "pub struct {name} {{");
    for (field, tag) in field_names.iter().zip(type_tags) {
        if field.is_empty() {
            continue;
        }
        let field = if field == "#" { "id" } else { field };
        match tag {
            TypeTag::Integer => {
                let _ = writeln!(out, "    pub {field}: i64,");
            }
            TypeTag::Boolean => {
                let _ = writeln!(out, "    pub {field}: bool,");
            }
            TypeTag::Str => {
                let _ = writeln!(out, "    pub {field}: String,");
            }
            TypeTag::Unknown(raw) => {
                let _ = writeln!(out, "    // unsupported tag '{raw}': {field}");
            }
        }
    }
    out.push_str("}\n");
    Ok(out)
}

/// Render an enum definition from (discriminant, label) pairs. Labels pass
/// through key sanitization so spaces and punctuation become identifier
/// characters.
pub fn render_enum(name: &str, members: &[(i64, &str)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]");
    let _ = writeln!(out, "pub enum {name} {{");
    for (value, label) in members {
        let _ = writeln!(out, "    {} = {value},", sanitize::sanitize_key(label));
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_struct_fields_by_tag() {
        let fields = vec![
            "#".to_string(),
            "name".to_string(),
            "is_unique".to_string(),
        ];
        let tags = vec![TypeTag::Integer, TypeTag::Str, TypeTag::Boolean];
        let out = render_row_struct("Item", &fields, &tags).unwrap();
        assert!(out.contains("pub struct Item {"));
        assert!(out.contains("    pub id: i64,"));
        assert!(out.contains("    pub name: String,"));
        assert!(out.contains("    pub is_unique: bool,"));
    }

    #[test]
    fn unknown_tags_render_as_comments() {
        let fields = vec!["icon".to_string()];
        let tags = vec![TypeTag::Unknown("Color".to_string())];
        let out = render_row_struct("Thing", &fields, &tags).unwrap();
        assert!(out.contains("// unsupported tag 'Color': icon"));
        assert!(!out.contains("pub icon"));
    }

    #[test]
    fn empty_fields_are_skipped() {
        let fields = vec![String::new(), "name".to_string()];
        let tags = vec![TypeTag::Integer, TypeTag::Str];
        let out = render_row_struct("Thing", &fields, &tags).unwrap();
        assert_eq!(out.matches("pub ").count(), 2); // struct line + name
    }

    #[test]
    fn mismatched_records_are_an_error() {
        let fields = vec!["name".to_string()];
        let err = render_row_struct("Thing", &fields, &[]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::LengthMismatch {
                name: "Thing".to_string(),
                fields: 1,
                tags: 0
            }
        );
    }

    #[test]
    fn renders_enum_members() {
        let out = render_enum(
            "CraftType",
            &[(0, "Woodworking"), (1, "Smithing"), (7, "Culinary Arts")],
        );
        assert!(out.contains("pub enum CraftType {"));
        assert!(out.contains("    Woodworking = 0,"));
        assert!(out.contains("    Culinary_Arts = 7,"));
    }
}
