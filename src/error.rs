use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlConsoleError {
    /// The backend rejected a submitted statement. Carries the backend's message text.
    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("Unimplemented feature: {0}")]
    Unimplemented(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SqlConsoleError {
    /// True when the error came from the backend rejecting a statement.
    #[must_use]
    pub fn is_execution(&self) -> bool {
        matches!(self, SqlConsoleError::ExecutionError(_))
    }
}

#[cfg(feature = "postgres")]
impl SqlConsoleError {
    /// Map a driver error to `ExecutionError`, keeping only the server's message when there is one.
    pub(crate) fn from_postgres(err: &tokio_postgres::Error) -> Self {
        let message = match err.as_db_error() {
            Some(db) => format!("{}: {}", db.severity(), db.message()),
            None => err.to_string(),
        };
        SqlConsoleError::ExecutionError(message)
    }
}

#[cfg(feature = "sqlite")]
impl SqlConsoleError {
    pub(crate) fn from_sqlite(err: rusqlite::Error) -> Self {
        SqlConsoleError::ExecutionError(err.to_string())
    }
}
