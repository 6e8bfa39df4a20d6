//! Test doubles shared by the engine's unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ClipboardError, ExecutionError};
use crate::model::{Column, RawValue, ResultSet, TableDescriptor};
use crate::query::Statement;
use crate::sinks::{ClipboardSink, Notification, NotificationSink, QueryExecutor};

pub fn table(name: &str, columns: &[&str], row_count: u64) -> TableDescriptor {
    TableDescriptor {
        name: name.to_string(),
        columns: columns.iter().map(|c| Column::named(*c)).collect(),
        row_count,
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    texts: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingClipboard {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn last(&self) -> Option<String> {
        self.texts.lock().unwrap().last().cloned()
    }
}

impl ClipboardSink for RecordingClipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError("clipboard unavailable".to_string()));
        }
        self.texts.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notes: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notes.lock().unwrap())
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notes.lock().unwrap().push(notification);
    }
}

/// Answers row queries with fixed rows and count queries with their length.
pub struct FakeExecutor {
    rows: ResultSet,
    count: Option<RawValue>,
    executed: Mutex<Vec<Statement>>,
}

impl FakeExecutor {
    pub fn with_rows(columns: &[&str], rows: Vec<Vec<RawValue>>) -> Self {
        Self {
            rows: ResultSet::new(columns.iter().map(|c| c.to_string()).collect(), rows),
            count: None,
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Override the value returned by count queries.
    pub fn with_count(mut self, count: RawValue) -> Self {
        self.count = Some(count);
        self
    }

    pub fn executed(&self) -> Vec<Statement> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for FakeExecutor {
    async fn execute(&self, statement: &Statement) -> Result<ResultSet, ExecutionError> {
        self.executed.lock().unwrap().push(statement.clone());
        if statement.sql.starts_with("SELECT COUNT(*)") {
            let count = self
                .count
                .clone()
                .unwrap_or_else(|| RawValue::from(self.rows.rows.len() as u64));
            return Ok(ResultSet::new(vec!["COUNT(*)".to_string()], vec![vec![count]]));
        }
        Ok(self.rows.clone())
    }
}
