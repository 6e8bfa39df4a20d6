//! SQLite adapter.
//!
//! [`SqliteDatabase`] implements both [`QueryExecutor`] and [`SchemaSource`]
//! over a single `rusqlite` connection. Calls run on tokio's blocking pool so
//! the async host never stalls on disk I/O.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, OpenFlags, params_from_iter};

use crate::error::ExecutionError;
use crate::model::{Column, RawValue, ResultSet, TableDescriptor};
use crate::query::{SqlParam, Statement, quote_ident};
use crate::sinks::{QueryExecutor, SchemaSource};

const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

#[derive(Clone)]
pub struct SqliteDatabase {
    conn: Arc<Mutex<Connection>>,
    label: String,
}

impl SqliteDatabase {
    /// Open an existing database file. Never creates one.
    pub fn open(path: &Path) -> Result<Self, ExecutionError> {
        let open_err = |message: String| ExecutionError::Open {
            path: path.display().to_string(),
            message,
        };
        if !path.is_file() {
            return Err(open_err("file does not exist".to_string()));
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_URI;
        let conn =
            Connection::open_with_flags(path, flags).map_err(|e| open_err(e.to_string()))?;
        log::info!("opened database {}", path.display());
        Ok(Self::from_connection(conn, path.display().to_string()))
    }

    pub fn open_in_memory() -> Result<Self, ExecutionError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn, ":memory:".to_string()))
    }

    pub fn from_connection(conn: Connection, label: String) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            label,
        }
    }

    /// Display name of the database (its path).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run a batch of statements, discarding results. Used for fixtures.
    pub async fn execute_batch(&self, sql: &str) -> Result<(), ExecutionError> {
        let sql = sql.to_string();
        self.with_conn(move |conn| conn.execute_batch(&sql).map_err(ExecutionError::from))
            .await
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, ExecutionError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, ExecutionError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| ExecutionError::Task {
                message: "connection lock poisoned".to_string(),
            })?;
            f(&guard)
        })
        .await
        .map_err(|e| ExecutionError::Task {
            message: e.to_string(),
        })?
    }
}

#[async_trait]
impl QueryExecutor for SqliteDatabase {
    async fn execute(&self, statement: &Statement) -> Result<ResultSet, ExecutionError> {
        let statement = statement.clone();
        log::debug!("execute: {}", statement.sql);
        self.with_conn(move |conn| run_statement(conn, &statement))
            .await
    }
}

#[async_trait]
impl SchemaSource for SqliteDatabase {
    async fn load_schema(&self) -> Result<Vec<TableDescriptor>, ExecutionError> {
        let tables = self.with_conn(read_schema).await?;
        log::info!("loaded schema: {} tables", tables.len());
        Ok(tables)
    }
}

fn run_statement(conn: &Connection, statement: &Statement) -> Result<ResultSet, ExecutionError> {
    let mut stmt = conn.prepare(&statement.sql)?;
    let column_names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = column_names.len();

    let params = statement.params.iter().map(|p| match p {
        SqlParam::Text(s) => Value::Text(s.clone()),
        SqlParam::Integer(i) => Value::Integer(*i),
    });

    let mut rows = stmt.query(params_from_iter(params))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let values = (0..width)
            .map(|i| row.get_ref(i).map(to_raw_value))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        out.push(values);
    }

    Ok(ResultSet::new(column_names, out))
}

fn to_raw_value(value: ValueRef<'_>) -> RawValue {
    match value {
        ValueRef::Null => RawValue::Null,
        ValueRef::Integer(i) => RawValue::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(RawValue::Number)
            .unwrap_or_else(|| RawValue::String(f.to_string())),
        ValueRef::Text(bytes) => RawValue::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => RawValue::String(text.to_string()),
            Err(_) => RawValue::String(format!("<blob {} bytes>", bytes.len())),
        },
    }
}

fn read_schema(conn: &Connection) -> Result<Vec<TableDescriptor>, ExecutionError> {
    let mut stmt = conn.prepare(LIST_TABLES_SQL)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    names
        .into_iter()
        .map(|name| -> Result<TableDescriptor, ExecutionError> {
            let columns = table_columns(conn, &name)?;
            let row_count: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", quote_ident(&name)),
                [],
                |row| row.get(0),
            )?;
            Ok(TableDescriptor {
                name,
                columns,
                row_count: u64::try_from(row_count).unwrap_or(0),
            })
        })
        .collect()
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<Column>, ExecutionError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
    let columns = stmt
        .query_map([], |row| {
            Ok(Column {
                name: row.get("name")?,
                data_type: row.get("type")?,
                not_null: row.get::<_, i64>("notnull")? != 0,
                is_primary_key: row.get::<_, i64>("pk")? > 0,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}
