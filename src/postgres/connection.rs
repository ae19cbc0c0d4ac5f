use tokio::task::JoinHandle;
use tokio_postgres::error::SqlState;
use tokio_postgres::{Client, NoTls};

use super::config::PostgresOptions;
use super::params::Params as PgParams;
use super::query::{
    build_result_set_from_statement, outcome_from_simple_messages, returned_rows_error,
};
use crate::adapters::params::convert_params;
use crate::error::SqlConsoleError;
use crate::results::{ExecutionMode, ExecutionOutcome};
use crate::statement::QueryAndParams;
use crate::translation::{PlaceholderStyle, translate_placeholders};
use crate::types::ConversionMode;

/// A single `PostgreSQL` client plus the task driving its socket.
pub struct PostgresConnection {
    client: Client,
    driver: JoinHandle<()>,
    translate_placeholders: bool,
}

impl std::fmt::Debug for PostgresConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresConnection")
            .field("closed", &self.client.is_closed())
            .field("translate_placeholders", &self.translate_placeholders)
            .finish()
    }
}

impl PostgresConnection {
    /// Open the connection described by `opts`.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ConfigError` for incomplete options or
    /// `SqlConsoleError::ConnectionError` if the server cannot be reached.
    pub async fn connect(opts: &PostgresOptions) -> Result<Self, SqlConsoleError> {
        let cfg = opts.to_pg_config()?;
        let (client, connection) = cfg.connect(NoTls).await.map_err(|e| {
            SqlConsoleError::ConnectionError(format!(
                "unable to connect to {}: {e}",
                opts.connection_url()
            ))
        })?;
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!("postgres connection ended with error: {e}");
            }
        });
        tracing::info!(url = %opts.connection_url(), "postgres connection established");
        Ok(Self {
            client,
            driver,
            translate_placeholders: opts.translate_placeholders,
        })
    }

    /// Run one statement.
    ///
    /// Statements without bind values go over the simple query protocol and come back as the
    /// server's own text. Bound statements are prepared as named server-side statements, which
    /// the client closes once the call returns, and decoded column by column.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if the server rejects the statement, or if an
    /// update returns rows.
    pub async fn execute(
        &mut self,
        stmt: &QueryAndParams,
        mode: ExecutionMode,
    ) -> Result<ExecutionOutcome, SqlConsoleError> {
        if !stmt.has_params() {
            let messages = self
                .client
                .simple_query(&stmt.query)
                .await
                .map_err(|e| SqlConsoleError::from_postgres(&e))?;
            return outcome_from_simple_messages(messages, mode);
        }

        let translated = if self.translate_placeholders {
            translate_placeholders(&stmt.query, PlaceholderStyle::Postgres)
        } else {
            std::borrow::Cow::Borrowed(stmt.query.as_str())
        };
        let sql: &str = &translated;
        let conversion = match mode {
            ExecutionMode::Update => ConversionMode::Execute,
            ExecutionMode::Rows | ExecutionMode::Count => ConversionMode::Query,
        };
        let converted = convert_params::<PgParams>(&stmt.params, conversion)?;

        match mode {
            ExecutionMode::Update => {
                let prepared = self
                    .client
                    .prepare(sql)
                    .await
                    .map_err(|e| SqlConsoleError::from_postgres(&e))?;
                if !prepared.columns().is_empty() {
                    return Err(returned_rows_error());
                }
                let affected = self
                    .client
                    .execute(&prepared, converted.as_refs())
                    .await
                    .map_err(|e| SqlConsoleError::from_postgres(&e))?;
                let affected = usize::try_from(affected).map_err(|e| {
                    SqlConsoleError::ExecutionError(format!(
                        "postgres affected rows conversion error: {e}"
                    ))
                })?;
                Ok(ExecutionOutcome::RowCount(affected))
            }
            ExecutionMode::Count => {
                let rows = self
                    .client
                    .query(sql, converted.as_refs())
                    .await
                    .map_err(|e| SqlConsoleError::from_postgres(&e))?;
                Ok(ExecutionOutcome::RowCount(rows.len()))
            }
            ExecutionMode::Rows => {
                let prepared = self
                    .client
                    .prepare(sql)
                    .await
                    .map_err(|e| SqlConsoleError::from_postgres(&e))?;
                let rows = self
                    .client
                    .query(&prepared, converted.as_refs())
                    .await
                    .map_err(|e| SqlConsoleError::from_postgres(&e))?;
                Ok(ExecutionOutcome::Rows(build_result_set_from_statement(
                    &prepared, &rows,
                )?))
            }
        }
    }

    /// Run a multi-statement script.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if any statement is rejected.
    pub async fn execute_batch(&mut self, script: &str) -> Result<(), SqlConsoleError> {
        self.client
            .batch_execute(script)
            .await
            .map_err(|e| SqlConsoleError::from_postgres(&e))
    }

    /// `currval` of the named sequence; `None` if the sequence is unknown or has no value yet in
    /// this session.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` for any other rejection.
    pub async fn current_sequence_value(
        &mut self,
        sequence: &str,
    ) -> Result<Option<i64>, SqlConsoleError> {
        let result = self
            .client
            .query_opt("SELECT currval($1::text::regclass)", &[&sequence])
            .await;
        match result {
            Ok(Some(row)) => row
                .try_get::<_, Option<i64>>(0)
                .map_err(|e| SqlConsoleError::from_postgres(&e)),
            Ok(None) => Ok(None),
            Err(e) if is_missing_sequence_value(&e) => {
                tracing::debug!(sequence, "sequence has no current value: {e}");
                Ok(None)
            }
            Err(e) => Err(SqlConsoleError::from_postgres(&e)),
        }
    }

    /// Close the client and wait for the connection task to finish.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ConnectionError` if the connection task panicked.
    pub async fn close(self) -> Result<(), SqlConsoleError> {
        let Self { client, driver, .. } = self;
        drop(client);
        driver.await.map_err(|e| {
            SqlConsoleError::ConnectionError(format!("postgres connection task failed: {e}"))
        })
    }
}

fn is_missing_sequence_value(err: &tokio_postgres::Error) -> bool {
    err.code().is_some_and(|code| {
        *code == SqlState::OBJECT_NOT_IN_PREREQUISITE_STATE || *code == SqlState::UNDEFINED_TABLE
    })
}
