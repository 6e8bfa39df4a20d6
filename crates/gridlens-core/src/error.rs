//! Error hierarchy for gridlens-core.
//!
//! Each layer owns a focused error enum; [`AppError`] unifies them for callers
//! that want a single type (the CLI entry point, config loading).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("QueryError: {0}")]
    Query(#[from] QueryError),
    #[error("ExecutionError: {0}")]
    Execution(#[from] ExecutionError),
    #[error("ClipboardError: {0}")]
    Clipboard(#[from] ClipboardError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

/// Failures while composing a browsing query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Column '{column}' does not exist in table '{table}'")]
    UnknownColumn { table: String, column: String },
    #[error("Table name must not be empty")]
    EmptyTableName,
    #[error("Page size must be positive")]
    InvalidPageSize,
}

/// The executor threw, or handed back something that is not a result set.
///
/// Cloneable so it can travel through the UI action channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("{message}")]
    Sql { message: String },
    #[error("Malformed result: {message}")]
    MalformedResult { message: String },
    #[error("Could not open database at {path}: {message}")]
    Open { path: String, message: String },
    #[error("Executor task failed: {message}")]
    Task { message: String },
}

impl ExecutionError {
    pub fn sql(message: impl Into<String>) -> Self {
        ExecutionError::Sql {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ExecutionError::MalformedResult {
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for ExecutionError {
    fn from(err: rusqlite::Error) -> Self {
        ExecutionError::sql(err.to_string())
    }
}

/// Clipboard write failure. Never fatal; surfaced as a notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ClipboardError(pub String);

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    High,
    Medium,
    Low,
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Query(_) => ErrorSeverity::Medium,
            AppError::Execution(ExecutionError::Open { .. }) => ErrorSeverity::High,
            AppError::Execution(_) => ErrorSeverity::Medium,
            AppError::Clipboard(_) => ErrorSeverity::Low,
            AppError::Storage(_) => ErrorSeverity::High,
        }
    }

    /// Short message suitable for a status line.
    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Execution(err) => err.to_string(),
            AppError::Clipboard(_) => "Could not copy to clipboard".to_string(),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_is_verbatim() {
        let err = ExecutionError::sql("no such table: users");
        assert_eq!(err.to_string(), "no such table: users");
        let app: AppError = err.into();
        assert_eq!(app.display_friendly(), "no such table: users");
    }

    #[test]
    fn test_severity_levels() {
        let open = AppError::from(ExecutionError::Open {
            path: "/tmp/x.db".to_string(),
            message: "denied".to_string(),
        });
        assert_eq!(open.severity(), ErrorSeverity::High);

        let clip = AppError::from(ClipboardError("busy".to_string()));
        assert_eq!(clip.severity(), ErrorSeverity::Low);
        assert_eq!(clip.display_friendly(), "Could not copy to clipboard");
    }

    #[test]
    fn test_query_error_message() {
        let err = QueryError::UnknownColumn {
            table: "users".to_string(),
            column: "nope".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Column 'nope' does not exist in table 'users'"
        );
    }
}
