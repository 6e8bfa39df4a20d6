//! # gridlens-core
//!
//! Tabular data presentation engine for SQLite databases.
//!
//! Given a table list and an async query executor, the engine keeps one grid
//! view consistent: which table is shown, the search term, the single sort
//! column, the page, and which columns are locked to the left edge. It also
//! formats cells, copies rows and columns, and can swap the table view for
//! the result of an ad-hoc SQL statement and back again.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gridlens_core::prelude::*;
//!
//! let db = SqliteDatabase::open(Path::new("app.db"))?;
//! let tables = db.load_schema().await?;
//! let mut grid = GridState::new(GridOptions::default(), tables, clipboard, notifier);
//!
//! if let Some(ticket) = grid.select_table("users") {
//!     grid.run_load(&db, ticket).await;
//! }
//! for row in grid.formatted_rows() { /* draw */ }
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   grid: state machine, view, copy   │  intents -> LoadTicket -> apply_load
//! ├─────────────────────────────────────┤
//! │   query / format / layout / export  │  pure functions
//! ├─────────────────────────────────────┤
//! │   sinks (traits) / sqlite adapter   │  executor, schema, clipboard, notices
//! ├─────────────────────────────────────┤
//! │   storage / display / utils         │  config, headless print, text width
//! └─────────────────────────────────────┘
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::Result;
    pub use crate::error::{AppError, ExecutionError};

    pub use crate::export::CopyFormat;
    pub use crate::grid::{GridOptions, GridState, LoadOutcome, LoadStatus, LoadTicket};
    pub use crate::model::{Mode, RawValue, ResultSet, SortDirection, SortSpec, TableDescriptor};
    pub use crate::sinks::{
        ClipboardSink, Notification, NotificationSink, QueryExecutor, SchemaSource,
    };
    pub use crate::sqlite::SqliteDatabase;
    pub use crate::storage::config::Config;
}

pub mod display;
pub mod error;
pub mod export;
pub mod format;
pub mod grid;
pub mod layout;
pub mod model;
pub mod query;
pub mod sinks;
pub mod sqlite;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

/// Convenient Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
