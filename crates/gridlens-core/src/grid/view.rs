//! Read-only projection of the grid for renderers.

use super::{GridState, LoadStatus, PAGE_WINDOW, page_window, row_range};
use crate::format::{FormattedCell, format_value};
use crate::layout::offset_for;
use crate::model::{Mode, SortDirection};

pub const NO_MATCHES_MESSAGE: &str = "No data found matching your search.";
pub const NO_DATA_MESSAGE: &str = "No data available.";

/// One column header as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub index: usize,
    pub name: String,
    pub sort: Option<SortDirection>,
    pub locked: bool,
    /// Left offset in terminal cells when locked
    pub offset: Option<u32>,
    pub is_primary_key: bool,
    /// Header clicks sort only while browsing a table
    pub sortable: bool,
}

impl HeaderCell {
    /// Header text with its sort arrow, if any.
    pub fn label(&self) -> String {
        match self.sort {
            Some(direction) => format!("{} {}", self.name, direction.arrow()),
            None => self.name.clone(),
        }
    }
}

/// Pager footer data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerInfo {
    pub page: u32,
    pub total_pages: u32,
    pub first_row: u64,
    pub last_row: u64,
    pub total_rows: u64,
    pub window: Vec<u32>,
}

impl PagerInfo {
    /// Page buttons are only worth showing with more than one page.
    pub fn has_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.first_row, self.last_row, self.total_rows
        )
    }
}

impl GridState {
    pub fn header(&self) -> Vec<HeaderCell> {
        let browsing = self.mode == Mode::Browsing;
        let descriptor = if browsing { self.current_descriptor() } else { None };
        let sort = self.browsing.sort.as_ref().filter(|_| browsing);

        self.visible_columns()
            .iter()
            .enumerate()
            .map(|(index, name)| HeaderCell {
                index,
                name: name.clone(),
                sort: sort
                    .filter(|s| &s.column == name)
                    .map(|s| s.direction),
                locked: self.locked.contains(index),
                offset: offset_for(index, &self.locked, self.options.slot_width),
                is_primary_key: descriptor
                    .and_then(|d| d.column(name))
                    .is_some_and(|c| c.is_primary_key),
                sortable: browsing,
            })
            .collect()
    }

    /// Formatted cells of one displayed row, padded to the column count.
    pub fn formatted_row(&self, row: usize) -> Option<Vec<FormattedCell>> {
        let values = self.visible_rows().get(row)?;
        Some(
            (0..self.visible_columns().len())
                .map(|i| format_value(values.get(i), self.options.truncate_length))
                .collect(),
        )
    }

    pub fn formatted_rows(&self) -> Vec<Vec<FormattedCell>> {
        (0..self.visible_rows().len())
            .filter_map(|i| self.formatted_row(i))
            .collect()
    }

    /// Pager data while browsing; ad-hoc results have no pager.
    pub fn pager(&self) -> Option<PagerInfo> {
        if self.mode != Mode::Browsing || self.browsing.table_name.is_none() {
            return None;
        }
        let b = &self.browsing;
        let total_pages = b.total_pages();
        let (first_row, last_row) = row_range(b.page, b.page_size, b.total_row_count);
        Some(PagerInfo {
            page: b.page,
            total_pages,
            first_row,
            last_row,
            total_rows: b.total_row_count,
            window: page_window(b.page, total_pages, PAGE_WINDOW),
        })
    }

    /// Message for an empty grid, distinguishing "no matches" from "no data".
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.status() != LoadStatus::Empty {
            return None;
        }
        if self.mode == Mode::Browsing && !self.browsing.search_term.is_empty() {
            Some(NO_MATCHES_MESSAGE)
        } else {
            Some(NO_DATA_MESSAGE)
        }
    }

    /// Panel title: the table name, or a label for ad-hoc results.
    pub fn title(&self) -> String {
        match self.mode {
            Mode::AdHoc => format!("Query Results ({} rows)", self.adhoc.rows.len()),
            Mode::Browsing => self
                .current_table()
                .map(str::to_string)
                .unwrap_or_else(|| "No table selected".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::grid::{GridOptions, LoadResponse, PageData};
    use crate::model::{ResultSet, TableDescriptor};
    use crate::testing::{RecordingClipboard, RecordingNotifier, table};

    fn grid(tables: Vec<TableDescriptor>) -> GridState {
        GridState::new(
            GridOptions {
                truncate_length: 3,
                slot_width: 20,
                ..GridOptions::default()
            },
            tables,
            Arc::new(RecordingClipboard::default()),
            Arc::new(RecordingNotifier::default()),
        )
    }

    fn load(grid: &mut GridState, rows: Vec<Vec<serde_json::Value>>, total: u64) {
        let ticket = grid.refresh().unwrap();
        grid.apply_load(LoadResponse {
            seq: ticket.seq,
            outcome: Ok(PageData {
                result: ResultSet::new(vec!["id".to_string(), "name".to_string()], rows),
                total_row_count: total,
            }),
        });
    }

    #[test]
    fn test_header_reflects_sort_and_locks() {
        let mut desc = table("users", &["id", "name"], 2);
        desc.columns[0].is_primary_key = true;
        let mut g = grid(vec![desc]);
        g.select_table("users");
        load(&mut g, vec![vec![json!(1), json!("ann")]], 1);
        g.set_sort("name");
        g.toggle_lock(1);

        let header = g.header();
        assert!(header[0].is_primary_key);
        assert_eq!(header[0].sort, None);
        assert_eq!(header[1].sort, Some(SortDirection::Ascending));
        assert_eq!(header[1].label(), "name ↑");
        assert_eq!(header[1].offset, Some(0));
        assert_eq!(header[0].offset, None);
        assert!(header.iter().all(|h| h.sortable));
    }

    #[test]
    fn test_formatted_rows_truncate() {
        let mut g = grid(vec![table("users", &["id", "name"], 2)]);
        g.select_table("users");
        load(&mut g, vec![vec![json!(1), json!("annabel")], vec![json!(2)]], 2);

        let rows = g.formatted_rows();
        assert_eq!(rows[0][1].display.as_str(), "ann...");
        assert!(rows[0][1].is_truncated);
        // short row padded with nulls
        assert!(rows[1][1].display.is_null());
    }

    #[test]
    fn test_pager_and_empty_messages() {
        let mut g = grid(vec![table("users", &["id", "name"], 120)]);
        g.select_table("users");
        load(&mut g, vec![vec![json!(1), json!("a")]], 120);
        let pager = g.pager().unwrap();
        assert_eq!(pager.total_pages, 3);
        assert_eq!(pager.summary(), "Showing 1 to 50 of 120 results");
        assert_eq!(pager.window, vec![1, 2, 3]);
        assert!(pager.has_controls());
        assert_eq!(g.empty_message(), None);

        let ticket = g.set_search("zzz").unwrap();
        g.apply_load(LoadResponse {
            seq: ticket.seq,
            outcome: Ok(PageData {
                result: ResultSet::new(vec!["id".to_string(), "name".to_string()], vec![]),
                total_row_count: 0,
            }),
        });
        assert_eq!(g.empty_message(), Some(NO_MATCHES_MESSAGE));
        assert_eq!(g.pager().unwrap().summary(), "Showing 0 to 0 of 0 results");

        g.submit_adhoc_result(vec!["x".to_string()], vec![]);
        assert_eq!(g.empty_message(), Some(NO_DATA_MESSAGE));
        assert!(g.pager().is_none());
        assert!(g.header().iter().all(|h| !h.sortable));
    }
}
