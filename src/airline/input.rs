use chrono::NaiveDate;

use crate::error::SqlConsoleError;

/// Parse a `YYYY-MM-DD` date typed at a prompt.
///
/// # Errors
/// Returns `SqlConsoleError::ParameterError` naming the offending text.
pub fn parse_date(raw: &str) -> Result<NaiveDate, SqlConsoleError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        SqlConsoleError::ParameterError(format!("invalid date '{trimmed}', expected YYYY-MM-DD"))
    })
}

/// Parse an integer key typed at a prompt.
///
/// # Errors
/// Returns `SqlConsoleError::ParameterError` naming the field.
pub fn parse_id(raw: &str, field: &str) -> Result<i64, SqlConsoleError> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().map_err(|_| {
        SqlConsoleError::ParameterError(format!("invalid {field} '{trimmed}', expected a number"))
    })
}

/// Parse an integer read back from a result column.
///
/// # Errors
/// Returns `SqlConsoleError::ExecutionError` if the column is NULL or not an integer.
pub fn column_int(value: Option<&str>, column: &str) -> Result<i64, SqlConsoleError> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .ok_or_else(|| {
            SqlConsoleError::ExecutionError(format!("column {column} is not an integer"))
        })
}
