use crate::config::ConnectionConfig;
use crate::error::SqlConsoleError;
#[cfg(feature = "postgres")]
use crate::postgres::PostgresConnection;
use crate::results::{ExecutionMode, ExecutionOutcome};
#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteConnection;
use crate::statement::QueryAndParams;
use crate::types::DatabaseType;

/// One open connection to whichever backend was configured.
#[derive(Debug)]
pub enum DbConnection {
    #[cfg(feature = "postgres")]
    Postgres(PostgresConnection),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteConnection),
}

impl DbConnection {
    /// Open a connection for `config`.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ConfigError` or `SqlConsoleError::ConnectionError` from the
    /// backend.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, SqlConsoleError> {
        match config {
            #[cfg(feature = "postgres")]
            ConnectionConfig::Postgres(opts) => {
                PostgresConnection::connect(opts).await.map(DbConnection::Postgres)
            }
            #[cfg(feature = "sqlite")]
            ConnectionConfig::Sqlite(opts) => {
                SqliteConnection::connect(opts).await.map(DbConnection::Sqlite)
            }
        }
    }

    #[must_use]
    pub fn db_type(&self) -> DatabaseType {
        match self {
            #[cfg(feature = "postgres")]
            DbConnection::Postgres(_) => DatabaseType::Postgres,
            #[cfg(feature = "sqlite")]
            DbConnection::Sqlite(_) => DatabaseType::Sqlite,
        }
    }

    /// Run one statement in the requested mode.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if the backend rejects the statement.
    pub async fn execute(
        &mut self,
        stmt: &QueryAndParams,
        mode: ExecutionMode,
    ) -> Result<ExecutionOutcome, SqlConsoleError> {
        match self {
            #[cfg(feature = "postgres")]
            DbConnection::Postgres(conn) => conn.execute(stmt, mode).await,
            #[cfg(feature = "sqlite")]
            DbConnection::Sqlite(conn) => conn.execute(stmt, mode).await,
        }
    }

    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if any statement in the script is rejected.
    pub async fn execute_batch(&mut self, script: &str) -> Result<(), SqlConsoleError> {
        match self {
            #[cfg(feature = "postgres")]
            DbConnection::Postgres(conn) => conn.execute_batch(script).await,
            #[cfg(feature = "sqlite")]
            DbConnection::Sqlite(conn) => conn.execute_batch(script).await,
        }
    }

    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if the lookup fails for a reason other than a
    /// missing value.
    pub async fn current_sequence_value(
        &mut self,
        sequence: &str,
    ) -> Result<Option<i64>, SqlConsoleError> {
        match self {
            #[cfg(feature = "postgres")]
            DbConnection::Postgres(conn) => conn.current_sequence_value(sequence).await,
            #[cfg(feature = "sqlite")]
            DbConnection::Sqlite(conn) => conn.current_sequence_value(sequence).await,
        }
    }

    /// # Errors
    /// Returns `SqlConsoleError::ConnectionError` if the backend fails to shut down cleanly.
    pub async fn close(self) -> Result<(), SqlConsoleError> {
        match self {
            #[cfg(feature = "postgres")]
            DbConnection::Postgres(conn) => conn.close().await,
            #[cfg(feature = "sqlite")]
            DbConnection::Sqlite(conn) => conn.close().await,
        }
    }
}
