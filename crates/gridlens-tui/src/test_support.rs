//! Grid fixtures shared by the UI tests.

use std::sync::{Arc, Mutex};

use gridlens_core::error::ClipboardError;
use gridlens_core::grid::{GridOptions, GridState, LoadResponse, PageData};
use gridlens_core::model::{Column, RawValue, ResultSet, TableDescriptor};
use gridlens_core::sinks::{ClipboardSink, Notification, NotificationSink};

#[derive(Default)]
pub struct MemoryClipboard {
    pub contents: Mutex<Vec<String>>,
}

impl ClipboardSink for MemoryClipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        if let Ok(mut contents) = self.contents.lock() {
            contents.push(text.to_string());
        }
        Ok(())
    }
}

impl MemoryClipboard {
    pub fn last(&self) -> Option<String> {
        self.contents.lock().ok()?.last().cloned()
    }
}

#[derive(Default)]
pub struct SilentNotifier;

impl NotificationSink for SilentNotifier {
    fn notify(&self, _notification: Notification) {}
}

pub fn descriptor(name: &str, columns: &[&str], row_count: u64) -> TableDescriptor {
    TableDescriptor {
        name: name.to_string(),
        columns: columns.iter().map(|c| Column::named(*c)).collect(),
        row_count,
    }
}

/// A grid browsing `name` with one page of `rows` already applied.
pub fn loaded_grid(
    name: &str,
    columns: &[&str],
    rows: Vec<Vec<RawValue>>,
    total: u64,
    clipboard: Arc<MemoryClipboard>,
) -> GridState {
    loaded_grid_with(GridOptions::default(), name, columns, rows, total, clipboard)
}

pub fn loaded_grid_with(
    options: GridOptions,
    name: &str,
    columns: &[&str],
    rows: Vec<Vec<RawValue>>,
    total: u64,
    clipboard: Arc<MemoryClipboard>,
) -> GridState {
    let mut grid = GridState::new(
        options,
        vec![descriptor(name, columns, total)],
        clipboard,
        Arc::new(SilentNotifier),
    );
    if let Some(ticket) = grid.select_table(name) {
        grid.apply_load(LoadResponse {
            seq: ticket.seq,
            outcome: Ok(PageData {
                result: ResultSet::new(columns.iter().map(|c| c.to_string()).collect(), rows),
                total_row_count: total,
            }),
        });
    }
    grid
}
