//! Service integration layer for gridlens-core.
//!
//! Wraps the SQLite adapter behind the calls the UI makes from background
//! tasks: schema loading, browsing loads, and ad-hoc statements.

use std::path::Path;

use gridlens_core::error::ExecutionError;
use gridlens_core::grid::{LoadResponse, LoadTicket, fetch_page};
use gridlens_core::model::{ResultSet, TableDescriptor};
use gridlens_core::query::Statement;
use gridlens_core::sinks::{QueryExecutor, SchemaSource};
use gridlens_core::sqlite::SqliteDatabase;

/// Generic loading state for async data.
///
/// This enum enforces proper handling of all loading states at compile time,
/// preventing bugs like displaying stale data while loading.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    /// Initial state, no data loaded yet
    #[default]
    Idle,
    /// Data is being fetched
    Loading,
    /// Data successfully loaded
    Loaded(T),
    /// Loading failed with error message
    Error(String),
}

impl<T> LoadState<T> {
    /// Check if currently loading
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Get reference to loaded data if available
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Database access for background tasks.
///
/// Designed to be wrapped in Arc for sharing across tokio tasks.
#[derive(Clone)]
pub struct DataService {
    db: SqliteDatabase,
}

impl DataService {
    /// Open an existing database file.
    pub fn open(path: &Path) -> Result<Self, ExecutionError> {
        Ok(Self::new(SqliteDatabase::open(path)?))
    }

    pub fn new(db: SqliteDatabase) -> Self {
        Self { db }
    }

    /// Display name of the open database.
    pub fn label(&self) -> &str {
        self.db.label()
    }

    pub fn executor(&self) -> &dyn QueryExecutor {
        &self.db
    }

    pub async fn load_schema(&self) -> Result<Vec<TableDescriptor>, String> {
        self.db.load_schema().await.map_err(|e| e.to_string())
    }

    /// Run both queries of a browsing load.
    pub async fn fetch(&self, ticket: &LoadTicket) -> LoadResponse {
        fetch_page(&self.db, ticket).await
    }

    /// Execute user-typed SQL as-is.
    pub async fn run_sql(&self, sql: &str) -> Result<ResultSet, ExecutionError> {
        self.db.execute(&Statement::raw(sql)).await
    }
}
