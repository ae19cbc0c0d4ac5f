use std::fmt::Write as _;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::SqlConsoleError;

/// Values that can be bound as statement parameters or read back from a row.
///
/// ```rust
/// use sql_console::prelude::*;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            RowValues::Date(value) => Some(*value),
            RowValues::Text(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    /// Textual form of the value, `None` for SQL NULL.
    ///
    /// Booleans use the PostgreSQL text form (`t`/`f`) so rows read through bound and unbound
    /// statements render the same way.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            RowValues::Null => None,
            RowValues::Int(i) => Some(i.to_string()),
            RowValues::Float(f) => Some(f.to_string()),
            RowValues::Text(s) => Some(s.clone()),
            RowValues::Bool(b) => Some(if *b { "t" } else { "f" }.to_string()),
            RowValues::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            RowValues::Time(t) => Some(t.format("%H:%M:%S%.f").to_string()),
            RowValues::Timestamp(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
            RowValues::JSON(v) => Some(v.to_string()),
            RowValues::Blob(bytes) => {
                let mut out = String::with_capacity(2 + bytes.len() * 2);
                out.push_str("\\x");
                for b in bytes {
                    let _ = write!(out, "{b:02x}");
                }
                Some(out)
            }
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<NaiveDate> for RowValues {
    fn from(value: NaiveDate) -> Self {
        RowValues::Date(value)
    }
}

/// The database backends this crate can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    /// `PostgreSQL` database
    #[cfg(feature = "postgres")]
    Postgres,
    /// `SQLite` database
    #[cfg(feature = "sqlite")]
    Sqlite,
}

impl Default for DatabaseType {
    #[cfg(feature = "postgres")]
    fn default() -> Self {
        DatabaseType::Postgres
    }

    #[cfg(all(feature = "sqlite", not(feature = "postgres")))]
    fn default() -> Self {
        DatabaseType::Sqlite
    }
}

/// The conversion "mode".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionMode {
    /// When the converted parameters will be used in a query (SELECT)
    Query,
    /// When the converted parameters will be used for statement execution (INSERT/UPDATE/etc.)
    Execute,
}

/// Convert a slice of `RowValues` into database-specific parameters.
pub trait ParamConverter<'a> {
    type Converted;

    /// Convert a slice of `RowValues` into the backend's parameter type.
    ///
    /// # Errors
    ///
    /// Returns `SqlConsoleError` if the conversion fails for any parameter.
    fn convert_sql_params(
        params: &'a [RowValues],
        mode: ConversionMode,
    ) -> Result<Self::Converted, SqlConsoleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_forms_follow_backend_conventions() {
        assert_eq!(RowValues::Null.to_text(), None);
        assert_eq!(RowValues::Int(42).to_text().as_deref(), Some("42"));
        assert_eq!(RowValues::Float(2.5).to_text().as_deref(), Some("2.5"));
        assert_eq!(RowValues::Bool(true).to_text().as_deref(), Some("t"));
        assert_eq!(RowValues::Blob(vec![0xde, 0xad]).to_text().as_deref(), Some("\\xdead"));

        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(RowValues::Date(date).to_text().as_deref(), Some("2024-03-09"));

        let ts = date.and_hms_opt(7, 5, 0).unwrap();
        assert_eq!(RowValues::Timestamp(ts).to_text().as_deref(), Some("2024-03-09 07:05:00"));
    }

    #[test]
    fn dates_can_be_read_back_from_text() {
        let v = RowValues::Text("2025-01-31".into());
        assert_eq!(v.as_date(), NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(RowValues::Text("31/01/2025".into()).as_date(), None);
    }
}
