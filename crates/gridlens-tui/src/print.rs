//! Non-interactive mode: load one page and print it as a table.

use std::sync::Arc;

use gridlens_core::display::TableDisplay;
use gridlens_core::grid::{GridOptions, GridState, LoadTicket};
use gridlens_core::sinks::{ClipboardSink, Notification, NotificationSink};

use crate::app::Startup;
use crate::error::{TuiError, TuiResult};
use crate::service::DataService;

/// Reports engine messages on stderr; stdout is reserved for the table.
struct StderrNotifier;

impl NotificationSink for StderrNotifier {
    fn notify(&self, notification: Notification) {
        if notification.is_error {
            eprintln!("{}: {}", notification.title, notification.description);
        } else {
            tracing::info!("{}: {}", notification.title, notification.description);
        }
    }
}

/// Render the requested page (or SQL result) as text.
pub async fn render(
    service: &DataService,
    options: GridOptions,
    startup: Startup,
    clipboard: Arc<dyn ClipboardSink>,
    display: &TableDisplay,
) -> TuiResult<String> {
    let tables = service.load_schema().await.map_err(TuiError::Config)?;
    let mut grid = GridState::new(options, tables, clipboard, Arc::new(StderrNotifier));

    if let Some(sql) = startup.sql {
        let seq = grid.issue_adhoc();
        let outcome = service.run_sql(&sql).await;
        if let Err(err) = &outcome {
            return Err(TuiError::Database(err.clone()));
        }
        grid.submit_adhoc_response(seq, outcome);
        return Ok(display.render_grid(&grid));
    }

    let table = match startup.table {
        Some(name) => name,
        None => grid
            .tables()
            .first()
            .map(|t| t.name.clone())
            .ok_or_else(|| TuiError::Config("database has no tables".to_string()))?,
    };
    if !grid.tables().iter().any(|t| t.name == table) {
        return Err(TuiError::Config(format!("no such table: {}", table)));
    }

    let ticket = grid.select_table(&table);
    run_load(&mut grid, service, ticket).await?;
    if let Some(term) = startup.search.filter(|t| !t.is_empty()) {
        let ticket = grid.set_search(&term);
        run_load(&mut grid, service, ticket).await?;
    }
    if let Some(page) = startup.page.filter(|&p| p > 1) {
        let ticket = grid.set_page(page);
        run_load(&mut grid, service, ticket).await?;
    }

    Ok(display.render_grid(&grid))
}

/// Run a load to completion and surface a failure as an error.
async fn run_load(
    grid: &mut GridState,
    service: &DataService,
    ticket: Option<LoadTicket>,
) -> TuiResult<()> {
    if let Some(ticket) = ticket {
        grid.run_load(service.executor(), ticket).await;
    }
    match grid.status().error() {
        Some(message) => Err(TuiError::Config(message.to_string())),
        None => Ok(()),
    }
}
