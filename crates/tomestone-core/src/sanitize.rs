//! Field-name and type-tag normalization for raw table headers.
//!
//! Upstream headers mix PascalCase, bracketed array suffixes (`Item[0]`),
//! brace-delimited qualifiers (`Level{Item}`) and markup tokens. Everything
//! funnels through a fixed, ordered substitution table followed by a
//! snake_case pass, so the same raw name always normalizes to the same
//! field name.

/// Ordered substitution table for key sanitization.
///
/// Order matters: the two-character `][` pair (from `[0][1]` style suffixes)
/// must be rewritten before the single brackets are removed.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    (":", ""),
    ("(", ""),
    (")", ""),
    ("{", ""),
    ("}", ""),
    ("][", "_"),
    ("[", ""),
    ("]", ""),
    ("<ms>", ""),
    ("<s>", ""),
    ("<%>", "_percent"),
    ("%", "_percent"),
    ("'", ""),
    (" ", "_"),
    ("-", "_"),
    ("\u{2013}", "_"),
];

/// Markup tokens stripped from cell values before coercion.
const STRIPPED_MARKUP: &[&str] = &["<Emphasis>", "</Emphasis>"];

/// Column names kept verbatim by the snake_case pass: job abbreviations and
/// short stat codes that double as field names in the job/recipe lookup
/// table.
const VERBATIM_KEYS: &[&str] = &[
    "CRP", "BSM", "ARM", "GSM", "LTW", "WVR", "ALC", "CUL", "HP", "MP", "TP", "GP", "CP", "ADV",
    "GLA", "PGL", "MRD", "LNC", "ARC", "CNJ", "THM", "MIN", "BTN", "FSH", "PLD", "MNK", "WAR",
    "DRG", "BRD", "WHM", "BLM", "ACN", "SMN", "SCH", "ROG", "NIN", "MCH", "DRK", "AST", "SAM",
    "RDM", "BLU", "GNB", "DNC", "RPR", "SGE", "VPR", "PCT",
];

/// Historically irregular names replaced wholesale instead of being run
/// through the snake_case pass.
const RENAMED_KEYS: &[(&str, &str)] = &[
    ("ItemID", "item_id"),
    ("IsPvP", "is_pvp"),
    ("ItemUICategory", "item_ui_category"),
    ("EXPBonus", "exp_bonus"),
    ("PvPActionSortRow", "pvp_action_sort_row"),
    ("UIPriority", "ui_priority"),
    ("OH_percent", "oh_percent"),
];

/// Strip markup tokens from a raw cell value.
pub fn sanitize_value(raw: &str) -> String {
    let mut value = raw.to_string();
    for token in STRIPPED_MARKUP {
        if value.contains(token) {
            value = value.replace(token, "");
        }
    }
    value
}

/// Apply the ordered substitution table to a raw field name.
///
/// A key longer than one character that starts with a digit has its `1`s and
/// `2`s spelled out first, so the result can serve as an identifier.
pub fn sanitize_key(raw: &str) -> String {
    let mut key = raw.to_string();
    if key.len() > 1 && key.as_bytes()[0].is_ascii_digit() {
        key = key.replace('1', "one").replace('2', "two");
    }
    for (from, to) in SUBSTITUTIONS {
        key = key.replace(from, to);
    }
    key
}

/// Convert a sanitized PascalCase/mixed key to snake_case.
///
/// Names on the verbatim list are returned untouched; names on the rename
/// list are replaced wholesale. Otherwise an underscore is inserted before
/// every uppercase letter past the first and the whole key is lowercased.
pub fn to_snake_case(key: &str) -> String {
    if VERBATIM_KEYS.contains(&key) {
        return key.to_string();
    }
    for (from, to) in RENAMED_KEYS {
        if key == *from {
            return (*to).to_string();
        }
    }
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Full key normalization: substitution table, then snake_case.
pub fn normalize_key(raw: &str) -> String {
    to_snake_case(&sanitize_key(raw))
}

/// A normalized per-field type tag.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum TypeTag {
    Integer,
    Boolean,
    Str,
    /// Tag spelling we do not recognize; the original text is preserved so
    /// schema artifacts can carry it as a comment.
    Unknown(String),
}

/// Tag spellings that count as integers. `bit&10` is listed ahead of the
/// boolean prefixes so the wider match wins.
const INT_TAGS: &[&str] = &[
    "int32", "sbyte", "uint16", "uint32", "bit&10", "byte", "int64", "int16", "Image",
];

const BOOL_TAGS: &[&str] = &["bit&", "bool"];

/// Normalize a raw type tag by literal-prefix matching.
///
/// Unrecognized tags are reported via a warning but are not fatal.
pub fn normalize_type_tag(raw: &str) -> TypeTag {
    if INT_TAGS.iter().any(|t| raw.starts_with(t)) {
        return TypeTag::Integer;
    }
    if BOOL_TAGS.iter().any(|t| raw.starts_with(t)) {
        return TypeTag::Boolean;
    }
    if raw.starts_with("str") {
        return TypeTag::Str;
    }
    log::warn!("unrecognized type tag '{raw}'");
    TypeTag::Unknown(raw.to_string())
}
