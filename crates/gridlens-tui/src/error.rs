//! Error types for the terminal front end.

use std::io;

use gridlens_core::AppError;
use gridlens_core::error::ExecutionError;
use thiserror::Error;

/// TUI-specific error type.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Terminal I/O error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Error surfaced by the engine (config, storage).
    #[error(transparent)]
    Core(#[from] AppError),

    /// The database could not be opened or read.
    #[error("Database error: {0}")]
    Database(#[from] ExecutionError),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The log subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type alias for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;
