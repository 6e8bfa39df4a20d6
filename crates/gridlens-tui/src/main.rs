//! gridlens - Terminal UI for SQLite tables
//!
//! Browse tables page by page with search, sort, and column locking, or run
//! ad-hoc SQL and inspect the result in the same grid.

use std::io::{self, stdout};
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gridlens_core::storage::config::Config;
use ratatui::backend::CrosstermBackend;

mod action;
mod app;
mod cli;
mod components;
mod error;
mod event;
mod layout;
mod logging;
mod print;
mod service;
#[cfg(test)]
mod test_support;

use app::{App, Startup};
use cli::Cli;
use components::SystemClipboard;
use error::TuiResult;
use service::DataService;

#[tokio::main]
async fn main() -> TuiResult<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.clone()).map_err(gridlens_core::AppError::from)?;

    if let Some(path) = &config.log_file {
        logging::init(path)?;
    }

    let db_path = cli.database_path(&config)?;
    let service = DataService::open(&db_path)?;
    let options = cli.grid_options(&config);
    let startup = Startup {
        table: cli.table.clone(),
        search: cli.search.clone(),
        page: cli.page,
        sql: cli.sql.clone(),
    };
    tracing::info!("opened {}", service.label());

    if cli.print {
        let display = cli.table_display();
        let text =
            print::render(&service, options, startup, Arc::new(SystemClipboard), &display).await?;
        println!("{}", text);
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    // Set panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let mut app = App::new(
        Arc::new(service),
        options,
        startup,
        Arc::new(SystemClipboard),
    );
    let result = app.run_async(&mut terminal).await;

    // Cleanup terminal
    restore_terminal()?;

    if let Err(ref err) = result {
        tracing::error!("application error: {}", err);
        eprintln!("Application error: {:?}", err);
    }

    Ok(result?)
}

/// Restore terminal to normal state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
