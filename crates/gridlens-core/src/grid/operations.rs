//! Copy and inspect operations over the displayed rows.
//!
//! Everything here works on full values, never the truncated display text,
//! and reports the outcome through the notification sink.

use super::GridState;
use crate::export::{CopyFormat, rows_to_csv, rows_to_json, rows_to_tsv};
use crate::format::{full_value, looks_like_json, pretty_json_or_raw};
use crate::sinks::Notification;

/// Full content of one cell, opened for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellInspection {
    pub column_name: String,
    pub full_value: String,
}

impl CellInspection {
    pub fn is_json(&self) -> bool {
        looks_like_json(&self.full_value)
    }

    pub fn label(&self) -> &'static str {
        if self.is_json() {
            "JSON content (formatted for readability)"
        } else {
            "Cell content"
        }
    }

    /// Text to show: pretty-printed JSON, or the value as-is.
    pub fn body(&self) -> String {
        pretty_json_or_raw(&self.full_value)
    }
}

impl GridState {
    /// Copy one displayed row as tab-joined full values.
    pub fn copy_row(&self, row: usize) -> bool {
        let Some(values) = self.row_full_values(row) else {
            return false;
        };
        self.copy_text(&values.join("\t"), "Row data")
    }

    /// Copy one displayed row in the given format, with a header line for
    /// the delimited formats.
    pub fn copy_row_as(&self, row: usize, format: CopyFormat) -> bool {
        let Some(raw) = self.visible_rows().get(row) else {
            return false;
        };
        let columns = self.visible_columns();
        let text = match format {
            CopyFormat::Json => rows_to_json(columns, std::slice::from_ref(raw)),
            CopyFormat::Csv | CopyFormat::Tsv => {
                let values = self.row_full_values(row).unwrap_or_default();
                self.delimited(format, &[values])
            }
        };
        self.copy_text(&text, &format!("Row as {}", format.label()))
    }

    /// Copy every displayed row of the current page.
    pub fn copy_page_as(&self, format: CopyFormat) -> bool {
        let rows = self.visible_rows();
        if rows.is_empty() {
            return false;
        }
        let text = match format {
            CopyFormat::Json => rows_to_json(self.visible_columns(), rows),
            CopyFormat::Csv | CopyFormat::Tsv => {
                let values: Vec<Vec<String>> = (0..rows.len())
                    .filter_map(|i| self.row_full_values(i))
                    .collect();
                self.delimited(format, &values)
            }
        };
        self.copy_text(&text, &format!("{} rows as {}", rows.len(), format.label()))
    }

    /// Copy one column of the displayed rows, newline-joined.
    pub fn copy_column(&self, column: usize) -> bool {
        let Some(name) = self.visible_columns().get(column) else {
            return false;
        };
        let values: Vec<String> = self
            .visible_rows()
            .iter()
            .map(|row| full_value(row.get(column)))
            .collect();
        self.copy_text(&values.join("\n"), &format!("Column \"{}\"", name))
    }

    /// Open the full value of a cell. `None` when out of range.
    pub fn inspect_cell(&self, row: usize, column: usize) -> Option<CellInspection> {
        let column_name = self.visible_columns().get(column)?.clone();
        let values = self.visible_rows().get(row)?;
        Some(CellInspection {
            column_name,
            full_value: full_value(values.get(column)),
        })
    }

    /// Copy the untruncated value of an inspected cell.
    pub fn copy_inspection(&self, inspection: &CellInspection) -> bool {
        self.copy_text(&inspection.full_value, "Content")
    }

    fn row_full_values(&self, row: usize) -> Option<Vec<String>> {
        let values = self.visible_rows().get(row)?;
        Some(
            (0..self.visible_columns().len())
                .map(|i| full_value(values.get(i)))
                .collect(),
        )
    }

    fn delimited(&self, format: CopyFormat, rows: &[Vec<String>]) -> String {
        match format {
            CopyFormat::Csv => rows_to_csv(self.visible_columns(), rows, true),
            _ => rows_to_tsv(self.visible_columns(), rows, true),
        }
    }

    /// Write to the clipboard and report the outcome. Never fails the grid.
    fn copy_text(&self, text: &str, description: &str) -> bool {
        match self.clipboard.write(text) {
            Ok(()) => {
                self.notify(Notification::info(
                    "Copied!",
                    format!("{} copied to clipboard", description),
                ));
                true
            }
            Err(err) => {
                log::warn!("clipboard write failed: {}", err);
                self.notify(Notification::error("Copy failed", "Could not copy to clipboard"));
                false
            }
        }
    }
}
