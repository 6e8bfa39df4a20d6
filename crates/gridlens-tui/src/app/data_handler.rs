//! Background database work.
//!
//! Each request runs on its own tokio task and reports back through the
//! action channel. Supersession is decided by the grid when the answer
//! arrives, so tasks are never cancelled.

use std::sync::Arc;

use gridlens_core::grid::LoadTicket;

use crate::action::AppAction;
use crate::service::LoadState;

use super::App;

impl App {
    pub(super) fn load_schema(&mut self) {
        if self.table_list.is_loading() {
            return;
        }
        self.table_list.update(LoadState::Loading);
        self.status_bar.set_message("Reading schema...");

        let service = Arc::clone(&self.service);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match service.load_schema().await {
                Ok(tables) => AppAction::SchemaLoaded(tables),
                Err(e) => AppAction::SchemaFailed(e),
            };
            let _ = tx.send(action);
        });
    }

    pub(super) fn fetch_page(&mut self, ticket: LoadTicket) {
        let service = Arc::clone(&self.service);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let response = service.fetch(&ticket).await;
            let _ = tx.send(AppAction::PageLoaded(response));
        });
    }

    pub(super) fn run_sql(&mut self, sql: String) {
        let seq = self.grid.issue_adhoc();
        tracing::info!("running ad-hoc query #{}", seq);
        self.status_bar.set_message("Executing query...");

        let service = Arc::clone(&self.service);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let outcome = service.run_sql(&sql).await;
            let _ = tx.send(AppAction::SqlFinished(seq, outcome));
        });
    }
}
