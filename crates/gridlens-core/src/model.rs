//! Domain types shared by every layer of the engine.

use serde::{Deserialize, Serialize};

/// A raw cell value as produced by the executor.
///
/// Null, boolean, number, string, or a structured (object/array) value.
pub type RawValue = serde_json::Value;

/// Column metadata from schema introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub not_null: bool,
    pub is_primary_key: bool,
}

impl Column {
    /// Convenience constructor for an untyped, nullable, non-key column.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: String::new(),
            not_null: false,
            is_primary_key: false,
        }
    }
}

/// One table of the loaded database. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<Column>,
    pub row_count: u64,
}

impl TableDescriptor {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Sort direction for the single active sort target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn sql_keyword(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }

    /// Arrow shown next to a sorted header.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Column names plus a row matrix, values positionally aligned with the names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub column_names: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl ResultSet {
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<RawValue>>) -> Self {
        Self { column_names, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at (row, column), `None` when either index is out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&RawValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}

/// Grid mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browsing,
    AdHoc,
}

/// Table-browsing parameters. Survive ad-hoc excursions untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowsingState {
    pub table_name: Option<String>,
    pub search_term: String,
    pub sort: Option<SortSpec>,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    pub total_row_count: u64,
}

impl BrowsingState {
    pub fn new(page_size: u32) -> Self {
        Self {
            table_name: None,
            search_term: String::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
            total_row_count: 0,
        }
    }

    /// Reset every browsing parameter for a freshly selected table.
    pub fn reset_for(&mut self, table: impl Into<String>) {
        self.table_name = Some(table.into());
        self.search_term.clear();
        self.sort = None;
        self.page = 1;
        self.total_row_count = 0;
    }

    /// `ceil(total / page_size)`, zero when there are no rows.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_row_count.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Same parameters, ignoring the row count which each load recomputes.
    pub fn same_request(&self, other: &BrowsingState) -> bool {
        self.table_name == other.table_name
            && self.search_term == other.search_term
            && self.sort == other.sort
            && self.page == other.page
            && self.page_size == other.page_size
    }
}
