//! Cell values and the textual coercion rules applied to every table cell.
//!
//! Every cell in a raw table is a piece of text. Coercion turns that text
//! into a typed [`CellValue`] using a fixed rule order; an empty cell
//! coerces to "absent" (`None`), which is why rows store `CellValue` only
//! for fields that carry data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single coerced table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Bool(bool),
    IntList(Vec<i64>),
    Str(String),
}

impl CellValue {
    /// Coerce raw cell text into a typed value.
    ///
    /// Rules are applied in order, first match wins:
    ///
    /// 1. Empty string -> absent (`None`).
    /// 2. All-digit string -> [`CellValue::Int`].
    /// 3. Case-insensitive `true`/`false` -> [`CellValue::Bool`].
    /// 4. Comma-separated groups of digits -> [`CellValue::IntList`].
    /// 5. Anything else -> [`CellValue::Str`], unchanged.
    ///
    /// A digit run too large for `i64` falls through to rule 5.
    pub fn coerce(raw: &str) -> Option<CellValue> {
        if raw.is_empty() {
            return None;
        }
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<i64>() {
                return Some(CellValue::Int(n));
            }
            return Some(CellValue::Str(raw.to_string()));
        }
        if raw.eq_ignore_ascii_case("true") {
            return Some(CellValue::Bool(true));
        }
        if raw.eq_ignore_ascii_case("false") {
            return Some(CellValue::Bool(false));
        }
        if raw.contains(',')
            && raw.bytes().all(|b| b.is_ascii_digit() || b == b',')
            && raw.bytes().any(|b| b.is_ascii_digit())
        {
            let parsed: Result<Vec<i64>, _> = raw.split(',').map(str::parse).collect();
            if let Ok(list) = parsed {
                return Some(CellValue::IntList(list));
            }
        }
        Some(CellValue::Str(raw.to_string()))
    }

    /// The integer payload, if this cell is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The string payload, if this cell is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The list payload, if this cell is an integer list.
    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            CellValue::IntList(v) => Some(v),
            _ => None,
        }
    }

    /// Interpret this cell as a boolean flag. Integer-stored flags (`0` /
    /// non-zero) coerce explicitly; strings and lists are never flags.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            CellValue::Int(n) => Some(*n != 0),
            _ => None,
        }
    }

    /// The canonical text form of this value. Re-coercing the rendered text
    /// yields an equal value for every variant except strings that happen to
    /// spell a number or boolean (which cannot be produced by [`coerce`]).
    ///
    /// [`coerce`]: CellValue::coerce
    pub fn render(&self) -> String {
        match self {
            CellValue::Int(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::IntList(v) => {
                let parts: Vec<String> = v.iter().map(|n| n.to_string()).collect();
                parts.join(",")
            }
            CellValue::Str(s) => s.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_absent() {
        assert_eq!(CellValue::coerce(""), None);
    }

    #[test]
    fn digits_coerce_to_int() {
        assert_eq!(CellValue::coerce("0"), Some(CellValue::Int(0)));
        assert_eq!(CellValue::coerce("10373"), Some(CellValue::Int(10373)));
    }

    #[test]
    fn negative_numbers_stay_strings() {
        // Only unsigned digit runs are integers; signs fall through to rule 5.
        assert_eq!(
            CellValue::coerce("-4"),
            Some(CellValue::Str("-4".to_string()))
        );
    }

    #[test]
    fn booleans_are_case_insensitive() {
        assert_eq!(CellValue::coerce("True"), Some(CellValue::Bool(true)));
        assert_eq!(CellValue::coerce("false"), Some(CellValue::Bool(false)));
        assert_eq!(CellValue::coerce("FALSE"), Some(CellValue::Bool(false)));
    }

    #[test]
    fn comma_separated_digits_coerce_to_list() {
        assert_eq!(
            CellValue::coerce("12,5"),
            Some(CellValue::IntList(vec![12, 5]))
        );
    }

    #[test]
    fn list_with_empty_segment_stays_string() {
        assert_eq!(
            CellValue::coerce("1,,2"),
            Some(CellValue::Str("1,,2".to_string()))
        );
        assert_eq!(CellValue::coerce(","), Some(CellValue::Str(",".to_string())));
    }

    #[test]
    fn mixed_text_stays_string() {
        assert_eq!(
            CellValue::coerce("Cryptomeria Log"),
            Some(CellValue::Str("Cryptomeria Log".to_string()))
        );
        assert_eq!(
            CellValue::coerce("1,two"),
            Some(CellValue::Str("1,two".to_string()))
        );
    }

    #[test]
    fn oversized_digit_run_stays_string() {
        let big = "99999999999999999999999999";
        assert_eq!(
            CellValue::coerce(big),
            Some(CellValue::Str(big.to_string()))
        );
    }

    #[test]
    fn render_round_trips_typed_values() {
        for raw in ["42", "true", "False", "12,5", "1,2,3"] {
            let v = CellValue::coerce(raw).unwrap();
            assert_eq!(CellValue::coerce(&v.render()), Some(v));
        }
    }

    #[test]
    fn flag_coercion() {
        assert_eq!(CellValue::Int(0).as_flag(), Some(false));
        assert_eq!(CellValue::Int(7).as_flag(), Some(true));
        assert_eq!(CellValue::Bool(true).as_flag(), Some(true));
        assert_eq!(CellValue::Str("1".to_string()).as_flag(), None);
    }

    #[test]
    fn serializes_as_plain_json() {
        assert_eq!(serde_json::to_string(&CellValue::Int(5)).unwrap(), "5");
        assert_eq!(
            serde_json::to_string(&CellValue::IntList(vec![1, 2])).unwrap(),
            "[1,2]"
        );
    }
}
