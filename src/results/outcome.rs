use super::result_set::ResultSet;
use crate::error::SqlConsoleError;

/// What a caller wants back from a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// INSERT/UPDATE/DELETE/DDL: report affected rows.
    Update,
    /// SELECT: materialize every row.
    Rows,
    /// SELECT: count rows, discard values.
    Count,
}

/// Result of a single statement: a row count or a materialized result set, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    RowCount(usize),
    Rows(ResultSet),
}

impl ExecutionOutcome {
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if the outcome holds rows instead of a count.
    pub fn into_row_count(self) -> Result<usize, SqlConsoleError> {
        match self {
            ExecutionOutcome::RowCount(n) => Ok(n),
            ExecutionOutcome::Rows(_) => Err(SqlConsoleError::ExecutionError(
                "expected a row count, statement produced rows".into(),
            )),
        }
    }

    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if the outcome holds a count instead of rows.
    pub fn into_result_set(self) -> Result<ResultSet, SqlConsoleError> {
        match self {
            ExecutionOutcome::Rows(rs) => Ok(rs),
            ExecutionOutcome::RowCount(_) => Err(SqlConsoleError::ExecutionError(
                "expected rows, statement produced a row count".into(),
            )),
        }
    }
}
