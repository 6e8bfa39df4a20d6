//! Configuration management
//!
//! Settings live in `~/.config/gridlens/config.toml`. Every field is optional;
//! missing fields fall back to the engine defaults.
//! Database priority: CLI argument > config.toml > GRIDLENS_DB environment variable

use super::Result;
use crate::error::StorageError;
use crate::grid::GridOptions;
use crate::layout::MAX_SLOT_WIDTH;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Environment variable consulted when no database path is configured.
pub const DATABASE_ENV: &str = "GRIDLENS_DB";

/// Application configuration
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Path to the SQLite database file
    pub database: Option<PathBuf>,
    /// Rows per browsing page
    pub page_size: Option<u32>,
    /// Maximum characters shown per cell before truncation
    pub truncate_length: Option<usize>,
    /// Width of one locked-column slot, in terminal cells
    pub lock_slot_width: Option<u32>,
    /// Log file; logging is off when unset
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            log::debug!("no config at {}, using defaults", config_path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("Failed to parse config file: {}", e),
            })?;

        Ok(config)
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(StorageError::ConfigDirNotFound)?;

        let app_config_dir = home_dir.join(".config").join("gridlens");
        Ok(app_config_dir.join("config.toml"))
    }

    /// Get database path with fallback to environment variable
    pub fn get_database(&self) -> Option<PathBuf> {
        self.database.clone().or_else(|| {
            std::env::var(DATABASE_ENV)
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        })
    }

    /// Engine options with unset or zero fields replaced by defaults. The
    /// slot width is capped at [`MAX_SLOT_WIDTH`].
    pub fn grid_options(&self) -> GridOptions {
        let defaults = GridOptions::default();
        GridOptions {
            page_size: self
                .page_size
                .filter(|&n| n > 0)
                .unwrap_or(defaults.page_size),
            truncate_length: self
                .truncate_length
                .filter(|&n| n > 0)
                .unwrap_or(defaults.truncate_length),
            slot_width: self
                .lock_slot_width
                .filter(|&n| n > 0)
                .map(|n| n.min(MAX_SLOT_WIDTH))
                .unwrap_or(defaults.slot_width),
        }
    }
}

impl From<&Config> for GridOptions {
    fn from(config: &Config) -> Self {
        config.grid_options()
    }
}
