use rusqlite::Statement;
use rusqlite::types::Value;

use crate::error::SqlConsoleError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
/// Returns `SqlConsoleError::ExecutionError` if the value cannot be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> Result<RowValues, SqlConsoleError> {
    let value: Value = row.get(idx).map_err(SqlConsoleError::from_sqlite)?;
    Ok(match value {
        Value::Null => RowValues::Null,
        Value::Integer(i) => RowValues::Int(i),
        Value::Real(f) => RowValues::Float(f),
        Value::Text(s) => RowValues::Text(s),
        Value::Blob(b) => RowValues::Blob(b),
    })
}

/// Run a prepared statement and materialize every row as text.
///
/// # Errors
/// Returns `SqlConsoleError::ExecutionError` if stepping the statement fails.
pub fn build_result_set(
    stmt: &mut Statement<'_>,
    params: &[&dyn rusqlite::ToSql],
) -> Result<ResultSet, SqlConsoleError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let column_count = column_names.len();

    let mut result_set = ResultSet::new(column_names);
    let mut rows = stmt.query(params).map_err(SqlConsoleError::from_sqlite)?;
    while let Some(row) = rows.next().map_err(SqlConsoleError::from_sqlite)? {
        let mut row_values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            row_values.push(sqlite_extract_value_sync(row, idx)?.to_text());
        }
        result_set.add_row_values(row_values)?;
    }

    Ok(result_set)
}

/// Step through every row without reading values.
///
/// # Errors
/// Returns `SqlConsoleError::ExecutionError` if stepping the statement fails.
pub fn count_rows(
    stmt: &mut Statement<'_>,
    params: &[&dyn rusqlite::ToSql],
) -> Result<usize, SqlConsoleError> {
    let mut rows = stmt.query(params).map_err(SqlConsoleError::from_sqlite)?;
    let mut count = 0;
    while rows.next().map_err(SqlConsoleError::from_sqlite)?.is_some() {
        count += 1;
    }
    Ok(count)
}
