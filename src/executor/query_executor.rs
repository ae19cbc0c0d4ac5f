use async_trait::async_trait;

use super::tabular::{NO_SEQUENCE_VALUE, TabularExecutor};
use crate::config::ConnectionConfig;
use crate::connection::DbConnection;
use crate::error::SqlConsoleError;
use crate::format::TableStyle;
use crate::results::{ExecutionMode, ExecutionOutcome};
use crate::statement::QueryAndParams;
use crate::types::DatabaseType;

/// Owns one database connection and runs statements against it one at a time.
///
/// ```rust,no_run
/// use sql_console::prelude::*;
///
/// # async fn demo() -> Result<(), SqlConsoleError> {
/// let mut executor = QueryExecutor::connect(SqliteOptions::in_memory()).await?;
/// executor
///     .execute_batch("CREATE TABLE Plane (PlaneID TEXT, Make TEXT)")
///     .await?;
/// let inserted = executor
///     .execute_update(QueryAndParams::new(
///         "INSERT INTO Plane VALUES ($1, $2)",
///         vec![RowValues::from("P1"), RowValues::from("Boeing")],
///     ))
///     .await?;
/// assert_eq!(inserted, 1);
/// executor.execute_query_and_print_result("SELECT * FROM Plane").await?;
/// executor.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct QueryExecutor {
    conn: DbConnection,
    style: TableStyle,
}

impl QueryExecutor {
    /// Open the configured backend.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ConfigError` for incomplete options or
    /// `SqlConsoleError::ConnectionError` if the backend is unreachable.
    pub async fn connect(config: impl Into<ConnectionConfig>) -> Result<Self, SqlConsoleError> {
        let config = config.into();
        let conn = DbConnection::connect(&config).await?;
        Ok(Self {
            conn,
            style: TableStyle::default(),
        })
    }

    #[must_use]
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn db_type(&self) -> DatabaseType {
        self.conn.db_type()
    }

    /// Run a multi-statement script such as a schema file.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if any statement is rejected.
    pub async fn execute_batch(&mut self, script: &str) -> Result<(), SqlConsoleError> {
        tracing::debug!(bytes = script.len(), "executing script");
        self.conn.execute_batch(script).await.inspect_err(|e| {
            tracing::warn!(error = %e, "script rejected");
        })
    }

    /// Release the connection.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ConnectionError` if the backend fails to shut down cleanly.
    pub async fn close(self) -> Result<(), SqlConsoleError> {
        tracing::debug!(backend = ?self.conn.db_type(), "closing connection");
        self.conn.close().await
    }
}

#[async_trait]
impl TabularExecutor for QueryExecutor {
    async fn execute(
        &mut self,
        stmt: QueryAndParams,
        mode: ExecutionMode,
    ) -> Result<ExecutionOutcome, SqlConsoleError> {
        tracing::debug!(
            sql = %stmt.query,
            params = stmt.params.len(),
            ?mode,
            "executing statement"
        );
        self.conn.execute(&stmt, mode).await.inspect_err(|e| {
            tracing::warn!(sql = %stmt.query, error = %e, "statement rejected");
        })
    }

    async fn current_sequence_value(&mut self, sequence: &str) -> Result<i64, SqlConsoleError> {
        let value = self.conn.current_sequence_value(sequence).await?;
        Ok(value.unwrap_or(NO_SEQUENCE_VALUE))
    }

    fn table_style(&self) -> &TableStyle {
        &self.style
    }
}
