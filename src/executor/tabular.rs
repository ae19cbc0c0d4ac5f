use std::io::{self, Write};

use async_trait::async_trait;

use crate::error::SqlConsoleError;
use crate::format::TableStyle;
use crate::results::{ExecutionMode, ExecutionOutcome, ResultSet};
use crate::statement::QueryAndParams;

/// Returned by [`TabularExecutor::current_sequence_value`] when the sequence has no value.
pub const NO_SEQUENCE_VALUE: i64 = -1;

/// Statement execution with results delivered as text tables.
///
/// Implementors provide [`execute`](TabularExecutor::execute) and the sequence lookup; the
/// update/query/print variants are built on top of them. Each call runs exactly one statement
/// and finishes with it before returning.
#[async_trait]
pub trait TabularExecutor: Send {
    /// Run `stmt` and hand back either a row count or the materialized rows, as `mode` asks.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if the backend rejects the statement.
    async fn execute(
        &mut self,
        stmt: QueryAndParams,
        mode: ExecutionMode,
    ) -> Result<ExecutionOutcome, SqlConsoleError>;

    /// Value of the named sequence, or [`NO_SEQUENCE_VALUE`] if there is none.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` only for failures other than a missing value.
    async fn current_sequence_value(&mut self, sequence: &str) -> Result<i64, SqlConsoleError>;

    /// Layout used by the print operations.
    fn table_style(&self) -> &TableStyle;

    /// Run an INSERT/UPDATE/DELETE/DDL statement and return the affected row count.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if the backend rejects the statement.
    async fn execute_update(
        &mut self,
        stmt: impl Into<QueryAndParams> + Send,
    ) -> Result<usize, SqlConsoleError> {
        self.execute(stmt.into(), ExecutionMode::Update)
            .await?
            .into_row_count()
    }

    /// Run a query and return every row as text, in delivery order.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if the backend rejects the statement.
    async fn execute_query_and_return_result(
        &mut self,
        stmt: impl Into<QueryAndParams> + Send,
    ) -> Result<ResultSet, SqlConsoleError> {
        self.execute(stmt.into(), ExecutionMode::Rows)
            .await?
            .into_result_set()
    }

    /// Run a query and return only its row count.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if the backend rejects the statement.
    async fn execute_query(
        &mut self,
        stmt: impl Into<QueryAndParams> + Send,
    ) -> Result<usize, SqlConsoleError> {
        self.execute(stmt.into(), ExecutionMode::Count)
            .await?
            .into_row_count()
    }

    /// Run a query and write a header line plus one line per row to `out`.
    ///
    /// Returns the number of data lines written. The header is written even for zero rows.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if the backend rejects the statement, or
    /// `SqlConsoleError::Io` if `out` fails.
    async fn print_result_to(
        &mut self,
        stmt: impl Into<QueryAndParams> + Send,
        out: &mut (dyn Write + Send),
    ) -> Result<usize, SqlConsoleError> {
        let result_set = self.execute_query_and_return_result(stmt).await?;
        Ok(self.table_style().write_result_set(out, &result_set)?)
    }

    /// [`print_result_to`](TabularExecutor::print_result_to) on standard output.
    ///
    /// # Errors
    /// Same as `print_result_to`.
    async fn execute_query_and_print_result(
        &mut self,
        stmt: impl Into<QueryAndParams> + Send,
    ) -> Result<usize, SqlConsoleError> {
        let result_set = self.execute_query_and_return_result(stmt).await?;
        Ok(print_to_stdout(self.table_style(), &result_set)?)
    }
}

fn print_to_stdout(style: &TableStyle, result_set: &ResultSet) -> io::Result<usize> {
    let mut out = io::stdout().lock();
    style.write_result_set(&mut out, result_set)
}
