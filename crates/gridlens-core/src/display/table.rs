//! Headless rendering of one grid page with comfy-table.

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use crossterm::terminal;

use crate::grid::GridState;
use crate::layout::LockedColumns;

pub struct TableDisplay {
    max_width: Option<u16>,
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: true,
        }
    }

    fn detect_terminal_width() -> Option<u16> {
        match terminal::size() {
            Ok((cols, _)) => Some(cols.clamp(40, 400)),
            Err(_) => Some(120),
        }
    }

    pub fn with_max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn bold_header(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(color)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    /// Title line, the current page as a table, and the pager summary.
    pub fn render_grid(&self, grid: &GridState) -> String {
        let mut output = format!("{}\n", grid.title());

        if let Some(message) = grid.empty_message() {
            output.push_str(message);
            return output;
        }
        if let Some(err) = grid.status().error() {
            output.push_str(&format!("Error: {}", err));
            return output;
        }

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        let header = grid.header();
        let order = display_order(header.len(), grid.locked_columns());

        table.set_header(order.iter().map(|&i| {
            let h = &header[i];
            let label = if h.locked {
                format!("{} [L]", h.label())
            } else {
                h.label()
            };
            let color = if h.is_primary_key {
                Color::Yellow
            } else {
                Color::Green
            };
            self.bold_header(&label, color)
        }));

        for row in grid.formatted_rows() {
            table.add_row(order.iter().map(|&i| {
                let cell = &row[i];
                if cell.display.is_null() && self.use_colors {
                    Cell::new(cell.display.as_str())
                        .fg(Color::DarkGrey)
                        .add_attribute(Attribute::Italic)
                } else {
                    Cell::new(cell.display.as_str())
                }
            }));
        }

        output.push_str(&table.to_string());
        match grid.pager() {
            Some(pager) => output.push_str(&format!(
                "\n{} | Page {}/{}",
                pager.summary(),
                pager.page,
                pager.total_pages.max(1)
            )),
            None => output.push_str(&format!("\n{} rows", grid.total_row_count())),
        }
        output
    }
}

/// Locked columns first (ascending), then the rest in their natural order.
pub fn display_order(column_count: usize, locked: &LockedColumns) -> Vec<usize> {
    let mut order: Vec<usize> = locked
        .sorted()
        .into_iter()
        .filter(|&i| i < column_count)
        .collect();
    order.extend((0..column_count).filter(|&i| !locked.contains(i)));
    order
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::grid::{GridOptions, LoadResponse, PageData};
    use crate::model::ResultSet;
    use crate::testing::{RecordingClipboard, RecordingNotifier, table};

    #[test]
    fn test_display_order() {
        let mut locked = LockedColumns::new();
        locked.toggle(3);
        locked.toggle(1);
        assert_eq!(display_order(5, &locked), vec![1, 3, 0, 2, 4]);
        assert_eq!(display_order(2, &locked), vec![1, 0]);
    }

    #[test]
    fn test_render_grid() {
        let mut grid = GridState::new(
            GridOptions::default(),
            vec![table("users", &["id", "name"], 1)],
            Arc::new(RecordingClipboard::default()),
            Arc::new(RecordingNotifier::default()),
        );
        let ticket = grid.select_table("users").unwrap();
        grid.apply_load(LoadResponse {
            seq: ticket.seq,
            outcome: Ok(PageData {
                result: ResultSet::new(
                    vec!["id".to_string(), "name".to_string()],
                    vec![vec![json!(1), json!(null)]],
                ),
                total_row_count: 1,
            }),
        });

        let out = TableDisplay::new()
            .with_colors(false)
            .with_max_width(80)
            .render_grid(&grid);
        assert!(out.starts_with("users\n"));
        assert!(out.contains("NULL"));
        assert!(out.ends_with("Showing 1 to 1 of 1 results | Page 1/1"));
    }
}
