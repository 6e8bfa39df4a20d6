//! Application action handling.
//!
//! Processes AppAction events and updates application state accordingly.

use gridlens_core::error::ExecutionError;
use gridlens_core::grid::{LoadOutcome, LoadResponse, LoadTicket};
use gridlens_core::model::{Mode, ResultSet, TableDescriptor};

use crate::action::AppAction;
use crate::components::Focus;
use crate::service::LoadState;

use super::App;

impl App {
    /// Handle an application action.
    pub(super) fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::NextPanel => {
                self.focus = self.focus.next();
            }
            AppAction::LoadSchema => {
                self.load_schema();
            }
            AppAction::SchemaLoaded(tables) => {
                self.handle_schema_loaded(tables);
            }
            AppAction::SchemaFailed(error) => {
                self.status_bar
                    .set_message(format!("Could not read schema: {}", error));
                self.table_list.update(LoadState::Error(error));
            }
            AppAction::SelectTable(name) => {
                self.open_table(&name);
            }
            AppAction::FetchPage(ticket) => {
                self.fetch_page(ticket);
            }
            AppAction::PageLoaded(response) => {
                self.handle_page_loaded(response);
            }
            AppAction::BackToBrowsing => {
                self.handle_back_to_browsing();
            }
            AppAction::RunSql(sql) => {
                self.run_sql(sql);
            }
            AppAction::SqlFinished(seq, outcome) => {
                self.handle_sql_finished(seq, outcome);
            }
            AppAction::Notify(notification) => {
                self.status_bar.notify(notification);
            }
        }
    }

    /// Queue a browsing load if the intent issued one.
    pub(crate) fn request_load(&mut self, ticket: Option<LoadTicket>) {
        if let Some(ticket) = ticket {
            self.send(AppAction::FetchPage(ticket));
        }
    }

    // === Action Handlers ===

    fn handle_schema_loaded(&mut self, tables: Vec<TableDescriptor>) {
        let count = tables.len();
        self.grid.set_tables(tables.clone());
        self.table_list.update(LoadState::Loaded(tables));
        self.status_bar.set_message(format!("Loaded {} tables", count));

        let Some(startup) = self.startup.take() else {
            return;
        };
        if let Some(sql) = startup.sql {
            self.send(AppAction::RunSql(sql));
        } else if let Some(table) = startup.table {
            self.open_table(&table);
            if let Some(term) = startup.search.filter(|t| !t.is_empty()) {
                let ticket = self.grid.set_search(&term);
                self.request_load(ticket);
            }
            self.pending_page = startup.page.filter(|&p| p > 1);
        }
    }

    fn open_table(&mut self, name: &str) {
        self.grid_panel.reset();
        self.table_list.set_active(Some(name));
        self.pending_page = None;
        self.focus = Focus::Grid;
        self.status_bar.set_message(format!("Loading {}...", name));
        let ticket = self.grid.select_table(name);
        self.request_load(ticket);
    }

    fn handle_page_loaded(&mut self, response: LoadResponse) {
        match self.grid.apply_load(response) {
            LoadOutcome::Applied => {
                self.grid_panel.clamp(&self.grid);
                if let Some(page) = self.pending_page.take() {
                    let ticket = self.grid.set_page(page);
                    self.request_load(ticket);
                    return;
                }
                self.status_bar.set_message(format!(
                    "Page {}/{} of {}",
                    self.grid.page(),
                    self.grid.total_pages().max(1),
                    self.grid.current_table().unwrap_or_default()
                ));
            }
            LoadOutcome::Refetch(ticket) => {
                tracing::debug!("page past the end, reloading page {}", self.grid.page());
                self.request_load(Some(ticket));
            }
            LoadOutcome::Failed => {
                self.pending_page = None;
                self.grid_panel.reset();
            }
            LoadOutcome::Discarded => {}
        }
    }

    fn handle_back_to_browsing(&mut self) {
        if self.grid.mode() != Mode::AdHoc {
            return;
        }
        let ticket = self.grid.return_to_browsing();
        self.grid_panel.reset();
        self.grid_panel.clamp(&self.grid);
        self.request_load(ticket);
        self.status_bar.set_message(match self.grid.current_table() {
            Some(name) => format!("Back to {}", name),
            None => "Back to browsing".to_string(),
        });
    }

    fn handle_sql_finished(&mut self, seq: u64, outcome: Result<ResultSet, ExecutionError>) {
        let succeeded = outcome.is_ok();
        if !self.grid.submit_adhoc_response(seq, outcome) {
            tracing::debug!("ignoring superseded SQL result #{}", seq);
            return;
        }
        if succeeded {
            self.grid_panel.reset();
            self.grid_panel.clamp(&self.grid);
            self.focus = Focus::Grid;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{app_with, settle};
    use super::*;
    use crate::app::Startup;

    async fn browsing_users() -> App {
        let (mut app, _) = app_with(Startup {
            table: Some("users".to_string()),
            ..Startup::default()
        })
        .await;
        app.send(AppAction::LoadSchema);
        settle(&mut app).await;
        app
    }

    #[tokio::test]
    async fn test_select_table_loads_first_page() {
        let mut app = browsing_users().await;
        assert_eq!(app.grid.total_row_count(), 5);
        assert_eq!(app.grid.visible_rows().len(), 2);
        assert_eq!(app.grid_panel.selected_row(), Some(0));
        assert_eq!(
            app.status_bar.message_text().as_deref(),
            Some("Page 1/3 of users")
        );

        app.send(AppAction::SelectTable("empty".to_string()));
        settle(&mut app).await;
        assert_eq!(app.grid.current_table(), Some("empty"));
        assert_eq!(app.grid.empty_message(), Some("No data available."));
    }

    #[tokio::test]
    async fn test_stale_page_is_discarded() {
        let mut app = browsing_users().await;
        let first = app.grid.next_page().unwrap();
        let second = app.grid.next_page().unwrap();

        // answer the newer request first, then the stale one
        let newer = app.service.fetch(&second).await;
        let older = app.service.fetch(&first).await;
        app.handle_action(AppAction::PageLoaded(newer));
        app.handle_action(AppAction::PageLoaded(older));

        assert_eq!(app.grid.page(), 3);
        assert_eq!(app.grid.visible_rows().len(), 1);
    }

    #[tokio::test]
    async fn test_sql_error_keeps_grid() {
        let mut app = browsing_users().await;
        app.send(AppAction::RunSql("SELECT * FROM nowhere".to_string()));
        settle(&mut app).await;

        assert_eq!(app.grid.mode(), Mode::Browsing);
        assert_eq!(app.grid.visible_rows().len(), 2);
        let message = app.status_bar.message_text().unwrap();
        assert!(message.starts_with("Query execution failed"));
        assert!(message.contains("no such table: nowhere"));
    }

    #[tokio::test]
    async fn test_back_to_browsing_reuses_loaded_page() {
        let mut app = browsing_users().await;
        app.send(AppAction::RunSql("SELECT 1 AS one".to_string()));
        settle(&mut app).await;
        assert_eq!(app.grid.mode(), Mode::AdHoc);

        app.handle_action(AppAction::BackToBrowsing);
        assert_eq!(app.grid.mode(), Mode::Browsing);
        // cached page shown without a reload
        assert_eq!(app.grid.visible_rows().len(), 2);
        assert_eq!(app.status_bar.message_text().as_deref(), Some("Back to users"));
    }

    #[tokio::test]
    async fn test_schema_failure_shown_in_list() {
        let (mut app, _) = app_with(Startup::default()).await;
        app.handle_action(AppAction::SchemaFailed("disk I/O error".to_string()));
        assert!(app.table_list.tables().is_empty());
        assert_eq!(
            app.status_bar.message_text().as_deref(),
            Some("Could not read schema: disk I/O error")
        );
    }
}
