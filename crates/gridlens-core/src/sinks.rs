//! Collaborator interfaces the engine is driven through.
//!
//! The engine never reaches for a global clipboard, toast system, or database
//! handle; hosts inject implementations of these traits.

use async_trait::async_trait;

use crate::error::{ClipboardError, ExecutionError};
use crate::model::{ResultSet, TableDescriptor};
use crate::query::Statement;

/// Runs SQL and returns column names plus rows, values aligned with the names.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, statement: &Statement) -> Result<ResultSet, ExecutionError>;
}

/// Supplies the table list once, at load time.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    async fn load_schema(&self) -> Result<Vec<TableDescriptor>, ExecutionError>;
}

pub trait ClipboardSink: Send + Sync {
    fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub is_error: bool,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            is_error: false,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            is_error: true,
        }
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}
