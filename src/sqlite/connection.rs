use std::fmt;
use std::sync::Arc;

use rusqlite::OptionalExtension;
use tokio::sync::Mutex;

use super::config::SqliteOptions;
use super::params::Params as SqliteParams;
use super::query::{build_result_set, count_rows};
use crate::adapters::params::convert_params;
use crate::error::SqlConsoleError;
use crate::results::{ExecutionMode, ExecutionOutcome};
use crate::statement::QueryAndParams;
use crate::translation::{PlaceholderStyle, translate_placeholders};
use crate::types::ConversionMode;

pub(crate) type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// A single `SQLite` connection. Every call runs on tokio's blocking pool.
pub struct SqliteConnection {
    conn: SharedSqliteConnection,
    db_path: String,
    translate_placeholders: bool,
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("db_path", &self.db_path)
            .field("translate_placeholders", &self.translate_placeholders)
            .finish_non_exhaustive()
    }
}

impl SqliteConnection {
    /// Open (or create) the database at `opts.db_path`.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ConfigError` for an empty path or
    /// `SqlConsoleError::ConnectionError` if the file cannot be opened.
    pub async fn connect(opts: &SqliteOptions) -> Result<Self, SqlConsoleError> {
        if opts.db_path.trim().is_empty() {
            return Err(SqlConsoleError::ConfigError(
                "sqlite database path is required".to_string(),
            ));
        }
        let path = opts.db_path.clone();
        let conn = tokio::task::spawn_blocking(move || {
            let conn = rusqlite::Connection::open(&path).map_err(|e| {
                SqlConsoleError::ConnectionError(format!("unable to open {path}: {e}"))
            })?;
            conn.execute_batch("PRAGMA journal_mode = WAL;")
                .map_err(SqlConsoleError::from_sqlite)?;
            Ok::<_, SqlConsoleError>(conn)
        })
        .await
        .map_err(|e| {
            SqlConsoleError::ConnectionError(format!("sqlite spawn_blocking join error: {e}"))
        })??;

        tracing::info!(path = %opts.db_path, "sqlite connection opened");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: opts.db_path.clone(),
            translate_placeholders: opts.translate_placeholders,
        })
    }

    /// Run one statement. Only the first statement of `stmt.query` is compiled; trailing
    /// statements are rejected by the driver.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if `SQLite` rejects the statement.
    pub async fn execute(
        &mut self,
        stmt: &QueryAndParams,
        mode: ExecutionMode,
    ) -> Result<ExecutionOutcome, SqlConsoleError> {
        let sql = if self.translate_placeholders {
            translate_placeholders(&stmt.query, PlaceholderStyle::Sqlite).into_owned()
        } else {
            stmt.query.clone()
        };
        let conversion = match mode {
            ExecutionMode::Update => ConversionMode::Execute,
            ExecutionMode::Rows | ExecutionMode::Count => ConversionMode::Query,
        };
        let params = convert_params::<SqliteParams>(&stmt.params, conversion)?;

        run_blocking(Arc::clone(&self.conn), move |conn| {
            let mut prepared = conn.prepare(&sql).map_err(SqlConsoleError::from_sqlite)?;
            let refs = params.as_refs();
            match mode {
                ExecutionMode::Update => prepared
                    .execute(&refs[..])
                    .map(ExecutionOutcome::RowCount)
                    .map_err(SqlConsoleError::from_sqlite),
                ExecutionMode::Count => {
                    count_rows(&mut prepared, &refs).map(ExecutionOutcome::RowCount)
                }
                ExecutionMode::Rows => {
                    build_result_set(&mut prepared, &refs).map(ExecutionOutcome::Rows)
                }
            }
        })
        .await
    }

    /// Run a multi-statement script.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if any statement is rejected.
    pub async fn execute_batch(&mut self, script: &str) -> Result<(), SqlConsoleError> {
        let script = script.to_owned();
        run_blocking(Arc::clone(&self.conn), move |conn| {
            conn.execute_batch(&script).map_err(SqlConsoleError::from_sqlite)
        })
        .await
    }

    /// Current value of an AUTOINCREMENT table's sequence, `None` if the table has never
    /// handed out a key or no AUTOINCREMENT table exists yet.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if the catalog cannot be read.
    pub async fn current_sequence_value(
        &mut self,
        sequence: &str,
    ) -> Result<Option<i64>, SqlConsoleError> {
        let name = sequence.to_owned();
        run_blocking(Arc::clone(&self.conn), move |conn| {
            let has_sequences = conn
                .query_row(
                    "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'",
                    [],
                    |_| Ok(()),
                )
                .optional()
                .map_err(SqlConsoleError::from_sqlite)?
                .is_some();
            if !has_sequences {
                return Ok(None);
            }
            conn.query_row(
                "SELECT seq FROM sqlite_sequence WHERE name = ?1",
                [&name],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map_err(SqlConsoleError::from_sqlite)
        })
        .await
    }

    /// Close the database handle.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ConnectionError` if `SQLite` refuses to close.
    pub async fn close(self) -> Result<(), SqlConsoleError> {
        let conn = Arc::try_unwrap(self.conn)
            .map_err(|_| {
                SqlConsoleError::ConnectionError("sqlite connection is still in use".to_string())
            })?
            .into_inner();
        tokio::task::spawn_blocking(move || {
            conn.close().map_err(|(_, e)| {
                SqlConsoleError::ConnectionError(format!("unable to close sqlite database: {e}"))
            })
        })
        .await
        .map_err(|e| {
            SqlConsoleError::ConnectionError(format!("sqlite spawn_blocking join error: {e}"))
        })??;
        tracing::info!(path = %self.db_path, "sqlite connection closed");
        Ok(())
    }
}

pub(crate) async fn run_blocking<F, R>(
    conn: SharedSqliteConnection,
    func: F,
) -> Result<R, SqlConsoleError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, SqlConsoleError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| SqlConsoleError::ExecutionError(format!("sqlite spawn_blocking join error: {e}")))?
}
