//! Application actions for event-driven architecture.
//!
//! Implements Flux-like unidirectional data flow:
//! Component → AppAction → App State → Component Re-render
//!
//! Background tasks report back through the same channel, so every state
//! change happens on the UI loop.

use gridlens_core::error::ExecutionError;
use gridlens_core::grid::{LoadResponse, LoadTicket};
use gridlens_core::model::{ResultSet, TableDescriptor};
use gridlens_core::sinks::Notification;

/// Application-level actions for component-to-app communication.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Move focus to the other panel
    NextPanel,

    // === Schema ===
    /// Read the table list from the database
    LoadSchema,

    /// Table list arrived
    SchemaLoaded(Vec<TableDescriptor>),

    /// Table list could not be read
    SchemaFailed(String),

    // === Browsing ===
    /// Open a table in the grid
    SelectTable(String),

    /// Run an issued browsing load in the background
    FetchPage(LoadTicket),

    /// A browsing load finished (possibly superseded)
    PageLoaded(LoadResponse),

    /// Leave ad-hoc results and show the browsed table again
    BackToBrowsing,

    // === Ad-hoc SQL ===
    /// Execute a user-typed SQL statement
    RunSql(String),

    /// An ad-hoc execution finished (seq, outcome)
    SqlFinished(u64, Result<ResultSet, ExecutionError>),

    // === Status ===
    /// Show a notification raised by the engine
    Notify(Notification),
}
