//! Grid state machine.
//!
//! [`GridState`] owns the browsing parameters, the locked-column set, the
//! current mode and the last result. Intents mutate it synchronously; intents
//! that need data return a [`LoadTicket`] which the host runs with
//! [`fetch_page`] and feeds back through [`GridState::apply_load`].
//!
//! ## Module Structure
//! - `mod.rs`: state, intents and the load lifecycle
//! - `pagination.rs`: pager arithmetic
//! - `operations.rs`: copy row/column and cell inspection
//! - `view.rs`: read-only projection for renderers

mod operations;
mod pagination;
mod view;

use std::sync::Arc;

use crate::error::ExecutionError;
use crate::format::DEFAULT_TRUNCATE_LENGTH;
use crate::layout::{DEFAULT_SLOT_WIDTH, LockedColumns};
use crate::model::{
    BrowsingState, Column, Mode, RawValue, ResultSet, SortSpec, TableDescriptor,
};
use crate::query::{QueryPair, build_queries};
use crate::sinks::{ClipboardSink, Notification, NotificationSink, QueryExecutor};

pub use operations::CellInspection;
pub use pagination::{PAGE_WINDOW, clamp_page, page_window, row_range};
pub use view::{HeaderCell, NO_DATA_MESSAGE, NO_MATCHES_MESSAGE, PagerInfo};

/// Default number of rows per browsing page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Engine settings resolved from config and CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub page_size: u32,
    pub truncate_length: usize,
    pub slot_width: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            truncate_length: DEFAULT_TRUNCATE_LENGTH,
            slot_width: DEFAULT_SLOT_WIDTH,
        }
    }
}

/// What the renderer should show for the current content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No table selected yet
    #[default]
    Idle,
    Loading,
    Ready,
    /// Zero rows. A valid state, not an error.
    Empty,
    Error(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadStatus::Error(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }

    fn for_rows(rows: &[Vec<RawValue>]) -> Self {
        if rows.is_empty() {
            LoadStatus::Empty
        } else {
            LoadStatus::Ready
        }
    }
}

/// One issued browsing load: the query pair and its supersession tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub queries: QueryPair,
}

/// Rows and count taken from the same logical request.
#[derive(Debug, Clone, PartialEq)]
pub struct PageData {
    pub result: ResultSet,
    pub total_row_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadResponse {
    pub seq: u64,
    pub outcome: Result<PageData, ExecutionError>,
}

/// What [`GridState::apply_load`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// Superseded by a newer request; ignored.
    Discarded,
    Failed,
    /// The page fell past the end of the data; run this clamped reload.
    Refetch(LoadTicket),
}

/// Run both queries of a ticket against the executor.
pub async fn fetch_page(executor: &dyn QueryExecutor, ticket: &LoadTicket) -> LoadResponse {
    let outcome = async {
        let result = executor.execute(&ticket.queries.rows.statement()).await?;
        validate_shape(&result)?;
        let count = executor.execute(&ticket.queries.count.statement()).await?;
        let total_row_count = extract_count(&count)?;
        Ok(PageData {
            result,
            total_row_count,
        })
    }
    .await;

    LoadResponse {
        seq: ticket.seq,
        outcome,
    }
}

fn validate_shape(result: &ResultSet) -> Result<(), ExecutionError> {
    let width = result.column_names.len();
    match result.rows.iter().position(|row| row.len() != width) {
        Some(idx) => Err(ExecutionError::malformed(format!(
            "row {} has {} values for {} columns",
            idx,
            result.rows[idx].len(),
            width
        ))),
        None => Ok(()),
    }
}

fn extract_count(result: &ResultSet) -> Result<u64, ExecutionError> {
    result
        .cell(0, 0)
        .and_then(RawValue::as_u64)
        .ok_or_else(|| ExecutionError::malformed("count query did not return a single integer"))
}

/// Grid state for one view. Not shareable across independent views.
pub struct GridState {
    options: GridOptions,
    tables: Vec<TableDescriptor>,
    mode: Mode,
    browsing: BrowsingState,
    browse_result: ResultSet,
    browse_status: LoadStatus,
    /// Parameters `browse_result` was loaded with; `None` when stale or failed
    loaded_params: Option<BrowsingState>,
    adhoc: ResultSet,
    locked: LockedColumns,
    next_seq: u64,
    latest_load: u64,
    latest_adhoc: u64,
    clipboard: Arc<dyn ClipboardSink>,
    notifier: Arc<dyn NotificationSink>,
}

impl GridState {
    pub fn new(
        options: GridOptions,
        tables: Vec<TableDescriptor>,
        clipboard: Arc<dyn ClipboardSink>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            options,
            tables,
            mode: Mode::Browsing,
            browsing: BrowsingState::new(options.page_size),
            browse_result: ResultSet::default(),
            browse_status: LoadStatus::Idle,
            loaded_params: None,
            adhoc: ResultSet::default(),
            locked: LockedColumns::new(),
            next_seq: 0,
            latest_load: 0,
            latest_adhoc: 0,
            clipboard,
            notifier,
        }
    }

    // === Accessors ===

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    /// Replace the table list after a schema reload.
    pub fn set_tables(&mut self, tables: Vec<TableDescriptor>) {
        self.tables = tables;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn browsing(&self) -> &BrowsingState {
        &self.browsing
    }

    pub fn current_table(&self) -> Option<&str> {
        self.browsing.table_name.as_deref()
    }

    pub fn current_descriptor(&self) -> Option<&TableDescriptor> {
        let name = self.current_table()?;
        self.tables.iter().find(|t| t.name == name)
    }

    fn displayed(&self) -> &ResultSet {
        match self.mode {
            Mode::Browsing => &self.browse_result,
            Mode::AdHoc => &self.adhoc,
        }
    }

    pub fn visible_columns(&self) -> &[String] {
        &self.displayed().column_names
    }

    pub fn visible_rows(&self) -> &[Vec<RawValue>] {
        &self.displayed().rows
    }

    pub fn status(&self) -> LoadStatus {
        match self.mode {
            Mode::Browsing => self.browse_status.clone(),
            Mode::AdHoc => LoadStatus::for_rows(&self.adhoc.rows),
        }
    }

    /// Row count behind the grid: filtered table count, or ad-hoc row count.
    pub fn total_row_count(&self) -> u64 {
        match self.mode {
            Mode::Browsing => self.browsing.total_row_count,
            Mode::AdHoc => self.adhoc.rows.len() as u64,
        }
    }

    /// Current page; ad-hoc results are always a single implicit page.
    pub fn page(&self) -> u32 {
        match self.mode {
            Mode::Browsing => self.browsing.page,
            Mode::AdHoc => 1,
        }
    }

    pub fn total_pages(&self) -> u32 {
        match self.mode {
            Mode::Browsing => self.browsing.total_pages(),
            Mode::AdHoc => 1,
        }
    }

    pub fn locked_columns(&self) -> &LockedColumns {
        &self.locked
    }

    // === Intents ===

    /// Switch to a table, resetting search, sort and page.
    pub fn select_table(&mut self, name: &str) -> Option<LoadTicket> {
        log::debug!("select table '{}'", name);
        self.browsing.reset_for(name);
        self.mode = Mode::Browsing;
        self.locked.clear();
        self.browse_result = ResultSet::default();
        self.loaded_params = None;
        self.begin_load()
    }

    pub fn set_search(&mut self, term: &str) -> Option<LoadTicket> {
        if !self.browsing_ready() {
            return None;
        }
        self.browsing.search_term = term.to_string();
        self.browsing.page = 1;
        self.begin_load()
    }

    /// Sort by `column`: cycles asc → desc → none on the active column, and
    /// starts at ascending on any other column.
    pub fn set_sort(&mut self, column: &str) -> Option<LoadTicket> {
        if !self.browsing_ready() {
            return None;
        }
        let columns = self.query_columns();
        if !columns.is_empty() && !columns.iter().any(|c| c.name == column) {
            let table = self.current_table().unwrap_or_default().to_string();
            let err = crate::error::QueryError::UnknownColumn {
                table,
                column: column.to_string(),
            };
            log::warn!("rejecting sort: {}", err);
            self.notify(Notification::error("Cannot sort", err.to_string()));
            return None;
        }
        self.browsing.sort = next_sort(self.browsing.sort.take(), column);
        self.browsing.page = 1;
        self.begin_load()
    }

    /// Go to page `n`, clamped into the valid range.
    pub fn set_page(&mut self, n: u32) -> Option<LoadTicket> {
        if !self.browsing_ready() {
            return None;
        }
        let clamped = clamp_page(n, self.browsing.total_pages());
        if clamped != n {
            log::debug!("page {} out of range, clamped to {}", n, clamped);
        }
        self.browsing.page = clamped;
        self.begin_load()
    }

    pub fn next_page(&mut self) -> Option<LoadTicket> {
        if self.browsing.page >= self.browsing.total_pages() {
            return None;
        }
        self.set_page(self.browsing.page + 1)
    }

    pub fn prev_page(&mut self) -> Option<LoadTicket> {
        if self.browsing.page <= 1 {
            return None;
        }
        self.set_page(self.browsing.page - 1)
    }

    pub fn first_page(&mut self) -> Option<LoadTicket> {
        if self.browsing.page == 1 {
            return None;
        }
        self.set_page(1)
    }

    pub fn last_page(&mut self) -> Option<LoadTicket> {
        let last = self.browsing.total_pages().max(1);
        if self.browsing.page == last {
            return None;
        }
        self.set_page(last)
    }

    /// Reload the current browsing page with unchanged parameters.
    pub fn refresh(&mut self) -> Option<LoadTicket> {
        if !self.browsing_ready() {
            return None;
        }
        self.begin_load()
    }

    /// Replace the displayed content with a one-shot result set.
    pub fn submit_adhoc_result(&mut self, column_names: Vec<String>, rows: Vec<Vec<RawValue>>) {
        self.mode = Mode::AdHoc;
        self.adhoc = ResultSet::new(column_names, rows);
        self.locked.clear();
        // supersede any browsing load still in flight
        self.latest_load = 0;
        if self.browse_status.is_loading() {
            self.loaded_params = None;
        }
    }

    /// Tag an ad-hoc execution so a late answer cannot overwrite newer content.
    pub fn issue_adhoc(&mut self) -> u64 {
        self.next_seq += 1;
        self.latest_adhoc = self.next_seq;
        self.latest_adhoc
    }

    /// Apply the answer to an ad-hoc execution issued with [`Self::issue_adhoc`].
    ///
    /// Returns false when the response was superseded. A failure leaves the
    /// grid as it was and only notifies.
    pub fn submit_adhoc_response(
        &mut self,
        seq: u64,
        outcome: Result<ResultSet, ExecutionError>,
    ) -> bool {
        if seq != self.latest_adhoc {
            log::debug!("discarding stale ad-hoc response #{}", seq);
            return false;
        }
        self.latest_adhoc = 0;
        match outcome {
            Ok(result) => {
                let count = result.rows.len();
                if result.column_names.is_empty() {
                    self.notify(Notification::info("Query executed", "No results returned"));
                } else {
                    self.notify(Notification::info(
                        "Query executed successfully",
                        format!("Returned {} rows", count),
                    ));
                }
                self.submit_adhoc_result(result.column_names, result.rows);
            }
            Err(err) => {
                log::warn!("ad-hoc query failed: {}", err);
                self.notify(Notification::error("Query execution failed", err.to_string()));
            }
        }
        true
    }

    /// Go back to table browsing with the parameters that were active before.
    pub fn return_to_browsing(&mut self) -> Option<LoadTicket> {
        if self.mode == Mode::Browsing {
            return None;
        }
        self.mode = Mode::Browsing;
        self.locked.clear();
        self.browsing.table_name.as_ref()?;

        let current = self
            .loaded_params
            .as_ref()
            .is_some_and(|loaded| loaded.same_request(&self.browsing));
        if current && !self.browse_status.is_error() {
            None
        } else {
            self.begin_load()
        }
    }

    /// Lock or unlock a displayed column. Returns the new lock state.
    pub fn toggle_lock(&mut self, column_index: usize) -> bool {
        if column_index >= self.visible_columns().len() {
            return false;
        }
        self.locked.toggle(column_index)
    }

    // === Load lifecycle ===

    fn browsing_ready(&self) -> bool {
        self.mode == Mode::Browsing && self.browsing.table_name.is_some()
    }

    /// Columns to filter and validate against: schema first, then whatever the
    /// last load of this table returned.
    fn query_columns(&self) -> Vec<Column> {
        if let Some(desc) = self.current_descriptor() {
            return desc.columns.clone();
        }
        self.browse_result
            .column_names
            .iter()
            .map(|name| Column::named(name.clone()))
            .collect()
    }

    fn begin_load(&mut self) -> Option<LoadTicket> {
        let table = self.browsing.table_name.clone()?;
        let columns = self.query_columns();
        let built = build_queries(
            &table,
            &columns,
            &self.browsing.search_term,
            self.browsing.sort.as_ref(),
            self.browsing.page,
            self.browsing.page_size,
        );

        self.next_seq += 1;
        self.latest_load = self.next_seq;
        self.latest_adhoc = 0;

        match built {
            Ok(queries) => {
                log::debug!(
                    "load #{} table='{}' search='{}' sort={:?} page={}",
                    self.next_seq,
                    table,
                    self.browsing.search_term,
                    self.browsing.sort,
                    self.browsing.page
                );
                self.browse_status = LoadStatus::Loading;
                Some(LoadTicket {
                    seq: self.next_seq,
                    queries,
                })
            }
            Err(err) => {
                self.fail_load(err.to_string());
                None
            }
        }
    }

    /// Apply an executor response. Only the most recently issued load wins.
    pub fn apply_load(&mut self, response: LoadResponse) -> LoadOutcome {
        if response.seq != self.latest_load || self.latest_load == 0 {
            log::debug!(
                "discarding stale load #{} (latest #{})",
                response.seq,
                self.latest_load
            );
            return LoadOutcome::Discarded;
        }
        self.latest_load = 0;

        match response.outcome {
            Ok(page) => {
                self.browsing.total_row_count = page.total_row_count;
                let total_pages = self.browsing.total_pages();
                if total_pages > 0 && self.browsing.page > total_pages {
                    self.browsing.page = total_pages;
                    return match self.begin_load() {
                        Some(ticket) => LoadOutcome::Refetch(ticket),
                        None => LoadOutcome::Failed,
                    };
                }
                if page.result.column_names.len() != self.browse_result.column_names.len() {
                    self.locked.retain_valid(page.result.column_names.len());
                }
                self.browse_status = LoadStatus::for_rows(&page.result.rows);
                self.browse_result = page.result;
                self.loaded_params = Some(self.browsing.clone());
                LoadOutcome::Applied
            }
            Err(err) => {
                log::warn!("load failed: {}", err);
                self.fail_load(err.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Run a ticket to completion and apply it, following clamped refetches.
    pub async fn run_load(&mut self, executor: &dyn QueryExecutor, ticket: LoadTicket) {
        let mut ticket = ticket;
        loop {
            let response = fetch_page(executor, &ticket).await;
            match self.apply_load(response) {
                LoadOutcome::Refetch(next) => ticket = next,
                _ => break,
            }
        }
    }

    fn fail_load(&mut self, message: String) {
        self.browse_result = ResultSet::default();
        self.browsing.total_row_count = 0;
        self.loaded_params = None;
        self.browse_status = LoadStatus::Error(message.clone());
        self.notify(Notification::error("Error loading data", message));
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }
}

/// Sort cycling rule shared by header clicks and key presses.
fn next_sort(current: Option<SortSpec>, column: &str) -> Option<SortSpec> {
    use crate::model::SortDirection::{Ascending, Descending};

    match current {
        Some(spec) if spec.column == column => match spec.direction {
            Ascending => Some(SortSpec::descending(column)),
            Descending => None,
        },
        _ => Some(SortSpec::ascending(column)),
    }
}
