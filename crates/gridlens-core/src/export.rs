//! Text serialization for copied rows.
//!
//! CSV, TSV, and JSON renditions of one or more grid rows. Inputs are full
//! values (see [`crate::format::full_value`]) for the delimited formats and
//! raw values for JSON, so numbers stay numbers.

use indexmap::IndexMap;

use crate::model::RawValue;

/// Clipboard format for a copied row or page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyFormat {
    #[default]
    Tsv,
    Csv,
    Json,
}

impl CopyFormat {
    pub fn label(&self) -> &'static str {
        match self {
            CopyFormat::Tsv => "TSV",
            CopyFormat::Csv => "CSV",
            CopyFormat::Json => "JSON",
        }
    }

    /// Shortcut key in the copy menu.
    pub fn key(&self) -> char {
        match self {
            CopyFormat::Tsv => 't',
            CopyFormat::Csv => 'c',
            CopyFormat::Json => 'j',
        }
    }

    pub const ALL: [CopyFormat; 3] = [CopyFormat::Tsv, CopyFormat::Csv, CopyFormat::Json];
}

/// Rows as CSV, header line first when `include_header` is set.
pub fn rows_to_csv(columns: &[String], rows: &[Vec<String>], include_header: bool) -> String {
    delimited(columns, rows, include_header, escape_csv_row)
}

/// Rows as TSV. Tabs and newlines inside values become spaces.
pub fn rows_to_tsv(columns: &[String], rows: &[Vec<String>], include_header: bool) -> String {
    delimited(columns, rows, include_header, escape_tsv_row)
}

fn delimited(
    columns: &[String],
    rows: &[Vec<String>],
    include_header: bool,
    escape: fn(&[String]) -> String,
) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    if include_header {
        lines.push(escape(columns));
    }
    lines.extend(rows.iter().map(|row| escape(row)));
    lines.join("\n")
}

/// One JSON object per row, keys in column order.
///
/// A single row is emitted as an object, several as an array.
pub fn rows_to_json(columns: &[String], rows: &[Vec<RawValue>]) -> String {
    let objects: Vec<IndexMap<&str, &RawValue>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect()
        })
        .collect();

    let rendered = match objects.as_slice() {
        [single] => serde_json::to_string_pretty(single),
        many => serde_json::to_string_pretty(many),
    };
    rendered.unwrap_or_else(|_| "[]".to_string())
}

fn escape_csv_row(values: &[String]) -> String {
    values
        .iter()
        .map(|v| {
            if v.contains([',', '"', '\n', '\r']) {
                format!("\"{}\"", v.replace('"', "\"\""))
            } else {
                v.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn escape_tsv_row(values: &[String]) -> String {
    values
        .iter()
        .map(|v| v.replace(['\t', '\n', '\r'], " "))
        .collect::<Vec<_>>()
        .join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_csv_with_header_and_escaping() {
        let cols = strings(&["id", "note"]);
        let rows = vec![strings(&["1", "Hello, \"World\""]), strings(&["2", "plain"])];
        assert_eq!(
            rows_to_csv(&cols, &rows, true),
            "id,note\n1,\"Hello, \"\"World\"\"\"\n2,plain"
        );
    }

    #[test]
    fn test_tsv_flattens_whitespace() {
        let cols = strings(&["desc"]);
        let rows = vec![strings(&["Line1\tLine2\nLine3"])];
        assert_eq!(rows_to_tsv(&cols, &rows, false), "Line1 Line2 Line3");
        assert_eq!(rows_to_tsv(&cols, &[], true), "desc");
    }

    #[test]
    fn test_json_keeps_column_order_and_types() {
        let cols = strings(&["zeta", "alpha"]);
        let single = rows_to_json(&cols, &[vec![json!(1), json!(null)]]);
        assert!(single.starts_with('{'));
        assert!(single.find("zeta").unwrap() < single.find("alpha").unwrap());
        assert!(single.contains("\"zeta\": 1"));
        assert!(single.contains("\"alpha\": null"));

        let many = rows_to_json(&cols, &[vec![json!(1), json!("a")], vec![json!(2), json!("b")]]);
        assert!(many.starts_with('['));
    }
}
