//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use gridlens_core::display::TableDisplay;
use gridlens_core::grid::GridOptions;
use gridlens_core::storage::config::Config;

use crate::error::{TuiError, TuiResult};

/// Browse SQLite tables and ad-hoc query results in the terminal.
#[derive(Parser, Debug, Default)]
#[command(name = "gridlens", version, about)]
pub struct Cli {
    /// SQLite database file (falls back to config, then GRIDLENS_DB)
    pub database: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Table to open on startup
    #[arg(short, long, value_name = "NAME")]
    pub table: Option<String>,

    /// Rows per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,

    /// Characters shown per cell before truncation
    #[arg(long, value_name = "N")]
    pub truncate: Option<usize>,

    /// Print one page to stdout and exit instead of starting the UI
    #[arg(long)]
    pub print: bool,

    /// Plain output without ANSI colors (with --print)
    #[arg(long, requires = "print")]
    pub no_color: bool,

    /// Table width in columns (with --print; defaults to the terminal width)
    #[arg(long, value_name = "N", requires = "print")]
    pub width: Option<u16>,

    /// Initial search term
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Initial page (1-based)
    #[arg(long, value_name = "N")]
    pub page: Option<u32>,

    /// Run a SQL statement and show its result instead of a table
    #[arg(long, value_name = "QUERY", conflicts_with_all = ["table", "search", "page"])]
    pub sql: Option<String>,
}

impl Cli {
    /// Database path: argument first, then config and environment.
    pub fn database_path(&self, config: &Config) -> TuiResult<PathBuf> {
        self.database
            .clone()
            .or_else(|| config.get_database())
            .ok_or_else(|| {
                TuiError::Config(
                    "no database given; pass a path or set GRIDLENS_DB".to_string(),
                )
            })
    }

    /// Print-mode table renderer.
    pub fn table_display(&self) -> TableDisplay {
        let display = TableDisplay::new().with_colors(!self.no_color);
        match self.width.filter(|&w| w > 0) {
            Some(width) => display.with_max_width(width),
            None => display,
        }
    }

    /// Engine options from config, with flags taking precedence.
    pub fn grid_options(&self, config: &Config) -> GridOptions {
        let mut options = config.grid_options();
        if let Some(n) = self.page_size.filter(|&n| n > 0) {
            options.page_size = n;
        }
        if let Some(n) = self.truncate.filter(|&n| n > 0) {
            options.truncate_length = n;
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "gridlens",
            "app.db",
            "--table",
            "users",
            "--page-size",
            "25",
            "--search",
            "ann",
            "--print",
        ])
        .unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("app.db")));
        assert_eq!(cli.table.as_deref(), Some("users"));
        assert_eq!(cli.page_size, Some(25));
        assert_eq!(cli.search.as_deref(), Some("ann"));
        assert!(cli.print);
    }

    #[test]
    fn test_print_flags_need_print() {
        let cli = Cli::try_parse_from([
            "gridlens",
            "app.db",
            "--print",
            "--no-color",
            "--width",
            "60",
        ])
        .unwrap();
        assert!(cli.no_color);
        assert_eq!(cli.width, Some(60));
        assert!(Cli::try_parse_from(["gridlens", "app.db", "--no-color"]).is_err());
    }

    #[test]
    fn test_sql_conflicts_with_table() {
        let result =
            Cli::try_parse_from(["gridlens", "app.db", "--sql", "SELECT 1", "--table", "t"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            page_size: Some(10),
            truncate_length: Some(40),
            ..Config::default()
        };
        let cli = Cli {
            page_size: Some(5),
            truncate: Some(0),
            ..Cli::default()
        };
        let options = cli.grid_options(&config);
        assert_eq!(options.page_size, 5);
        // zero flag ignored
        assert_eq!(options.truncate_length, 40);
    }

    #[test]
    fn test_database_path_prefers_argument() {
        let config = Config {
            database: Some(PathBuf::from("from_config.db")),
            ..Config::default()
        };
        let cli = Cli {
            database: Some(PathBuf::from("arg.db")),
            ..Cli::default()
        };
        assert_eq!(cli.database_path(&config).unwrap(), PathBuf::from("arg.db"));
        assert_eq!(
            Cli::default().database_path(&config).unwrap(),
            PathBuf::from("from_config.db")
        );
    }
}
