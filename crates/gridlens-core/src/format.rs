//! Cell value formatting.
//!
//! Turns a [`RawValue`] into a display form plus an untruncated "full" string.
//! The full string is what copy and inspect operations work on, so it is always
//! a string, even for nulls.

use crate::model::RawValue;

/// Default maximum display length in characters.
pub const DEFAULT_TRUNCATE_LENGTH: usize = 100;

/// Marker appended to truncated display text.
pub const ELLIPSIS: &str = "...";

/// Full-value sentinel for null cells.
pub const NULL_TEXT: &str = "NULL";

/// Display text of a cell. Null is kept distinct so renderers can style it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellText {
    Null,
    Text(String),
}

impl CellText {
    pub fn as_str(&self) -> &str {
        match self {
            CellText::Null => NULL_TEXT,
            CellText::Text(text) => text,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellText::Null)
    }
}

/// Result of formatting one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedCell {
    pub display: CellText,
    pub is_truncated: bool,
    pub full_value: String,
}

/// Format a cell value for the grid.
///
/// `None` (a short row) is treated like a null cell.
pub fn format_value(value: Option<&RawValue>, truncate_length: usize) -> FormattedCell {
    let full_value = match value {
        None | Some(RawValue::Null) => {
            return FormattedCell {
                display: CellText::Null,
                is_truncated: false,
                full_value: NULL_TEXT.to_string(),
            };
        }
        Some(value) => canonical_text(value),
    };

    match truncate_chars(&full_value, truncate_length) {
        Some(prefix) => FormattedCell {
            display: CellText::Text(format!("{}{}", prefix, ELLIPSIS)),
            is_truncated: true,
            full_value,
        },
        None => FormattedCell {
            display: CellText::Text(full_value.clone()),
            is_truncated: false,
            full_value,
        },
    }
}

/// Full value of a cell without building the display form.
pub fn full_value(value: Option<&RawValue>) -> String {
    match value {
        None | Some(RawValue::Null) => NULL_TEXT.to_string(),
        Some(value) => canonical_text(value),
    }
}

/// Type-specific string form, before truncation.
fn canonical_text(value: &RawValue) -> String {
    match value {
        RawValue::Null => NULL_TEXT.to_string(),
        RawValue::String(s) => s.clone(),
        RawValue::Bool(b) => b.to_string(),
        RawValue::Number(n) => n.to_string(),
        RawValue::Object(_) | RawValue::Array(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

/// First `max_chars` characters when `text` is longer, `None` otherwise.
fn truncate_chars(text: &str, max_chars: usize) -> Option<&str> {
    text.char_indices()
        .nth(max_chars)
        .map(|(byte_idx, _)| &text[..byte_idx])
}

/// Whether the text parses as JSON. The `NULL` sentinel and empty text never do.
///
/// Only chooses the inspector's label; formatting never depends on it.
pub fn looks_like_json(text: &str) -> bool {
    if text.is_empty() || text == NULL_TEXT {
        return false;
    }
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

/// Re-indent JSON text for reading; anything else is returned unchanged.
pub fn pretty_json_or_raw(text: &str) -> String {
    if !looks_like_json(text) {
        return text.to_string();
    }
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_normalized() {
        for n in [0, 1, 4, 100] {
            let cell = format_value(Some(&RawValue::Null), n);
            assert_eq!(cell.display, CellText::Null);
            assert!(!cell.is_truncated);
            assert_eq!(cell.full_value, "NULL");
        }
        assert_eq!(format_value(None, 10).full_value, "NULL");
    }

    #[test]
    fn test_scalars_use_canonical_form() {
        assert_eq!(format_value(Some(&json!(42)), 100).full_value, "42");
        assert_eq!(format_value(Some(&json!(1.5)), 100).full_value, "1.5");
        assert_eq!(format_value(Some(&json!(true)), 100).full_value, "true");
        // strings are not JSON-quoted
        assert_eq!(format_value(Some(&json!("abc")), 100).full_value, "abc");
    }

    #[test]
    fn test_truncation_flag_matches_length() {
        let samples = ["", "a", "hello", "hello world", "ünïcödé strïng"];
        for s in samples {
            for limit in 1..15 {
                let cell = format_value(Some(&json!(s)), limit);
                let len = s.chars().count();
                assert_eq!(cell.is_truncated, len > limit, "{:?} @ {}", s, limit);
                assert_eq!(cell.full_value, s);
                if cell.is_truncated {
                    let shown = cell.display.as_str();
                    let prefix = shown.strip_suffix(ELLIPSIS).unwrap();
                    assert_eq!(prefix.chars().count(), limit);
                    assert!(s.starts_with(prefix));
                } else {
                    assert_eq!(cell.display.as_str(), s);
                }
            }
        }
    }

    #[test]
    fn test_structured_values_are_pretty_printed() {
        let value = json!({"zeta": 1, "alpha": [1, 2]});
        let cell = format_value(Some(&value), 1000);
        assert!(cell.full_value.contains('\n'));
        assert!(cell.full_value.contains("  \"zeta\": 1"));
        // key order follows the source, not alphabetical
        let z = cell.full_value.find("zeta").unwrap();
        let a = cell.full_value.find("alpha").unwrap();
        assert!(z < a);
    }

    #[test]
    fn test_structured_value_truncates_like_text() {
        let value = json!({"key": "x".repeat(200)});
        let cell = format_value(Some(&value), DEFAULT_TRUNCATE_LENGTH);
        assert!(cell.is_truncated);
        assert_eq!(
            cell.display.as_str().chars().count(),
            DEFAULT_TRUNCATE_LENGTH + ELLIPSIS.len()
        );
        assert!(cell.full_value.len() > 200);
    }

    #[test]
    fn test_looks_like_json() {
        assert!(!looks_like_json("NULL"));
        assert!(!looks_like_json(""));
        assert!(!looks_like_json("hello"));
        assert!(looks_like_json("{\"a\": 1}"));
        assert!(looks_like_json("[1, 2]"));
        assert!(looks_like_json("42"));
    }

    #[test]
    fn test_pretty_json_or_raw() {
        assert_eq!(pretty_json_or_raw("plain"), "plain");
        assert_eq!(pretty_json_or_raw("NULL"), "NULL");
        assert_eq!(pretty_json_or_raw("{\"a\":1}"), "{\n  \"a\": 1\n}");
    }
}
