use crate::airline::{AirlineApp, Console};
use crate::error::SqlConsoleError;
use crate::executor::TabularExecutor;

/// Airline schema plus seed rows; portable between the backends.
pub const AIRLINE_SCHEMA: &str = include_str!("../../sql/airline.sql");

/// Output of a scripted console session.
#[derive(Debug)]
pub struct Transcript<X> {
    pub executor: X,
    pub stdout: String,
    pub stderr: String,
}

/// Drive the airline console with `input` as if typed at the terminal.
///
/// # Errors
/// Returns `SqlConsoleError::Io` if the in-memory terminal fails.
pub async fn run_scripted<X: TabularExecutor>(
    executor: X,
    input: &str,
) -> Result<Transcript<X>, SqlConsoleError> {
    let console = Console::new(input.as_bytes(), Vec::new(), Vec::new());
    let mut app = AirlineApp::new(executor, console);
    app.run().await?;
    let (executor, console) = app.into_parts();
    let (_, out, err) = console.into_parts();
    Ok(Transcript {
        executor,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    })
}

/// In-memory `SQLite` executor loaded with [`AIRLINE_SCHEMA`].
///
/// # Errors
/// Returns any error from opening the database or loading the schema.
#[cfg(feature = "sqlite")]
pub async fn sqlite_airline_executor() -> Result<crate::executor::QueryExecutor, SqlConsoleError> {
    let mut executor =
        crate::executor::QueryExecutor::connect(crate::sqlite::SqliteOptions::in_memory()).await?;
    executor.execute_batch(AIRLINE_SCHEMA).await?;
    Ok(executor)
}
