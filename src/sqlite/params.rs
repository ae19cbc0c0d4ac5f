use rusqlite::types::Value;

use crate::error::SqlConsoleError;
use crate::types::{ConversionMode, ParamConverter, RowValues};

/// Convert a single `RowValues` to a rusqlite `Value`.
///
/// `SQLite` has no date or time storage class; those are bound as ISO-8601 text so they compare
/// correctly against text columns.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> Value {
    match value {
        RowValues::Int(i) => Value::Integer(*i),
        RowValues::Float(f) => Value::Real(*f),
        RowValues::Text(s) => Value::Text(s.clone()),
        RowValues::Bool(b) => Value::Integer(i64::from(*b)),
        RowValues::Date(d) => Value::Text(d.format("%F").to_string()),
        RowValues::Time(t) => Value::Text(t.format("%T%.f").to_string()),
        RowValues::Timestamp(dt) => Value::Text(dt.format("%F %T%.f").to_string()),
        RowValues::Null => Value::Null,
        RowValues::JSON(jval) => Value::Text(jval.to_string()),
        RowValues::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// Owned `SQLite` parameters, movable onto the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct Params(pub Vec<Value>);

impl Params {
    /// Convert bind values into `SQLite` values.
    ///
    /// # Errors
    /// Currently infallible; kept fallible to match the other converters.
    pub fn convert(params: &[RowValues]) -> Result<Self, SqlConsoleError> {
        Ok(Params(params.iter().map(row_value_to_sqlite_value).collect()))
    }

    #[must_use]
    pub fn as_values(&self) -> &[Value] {
        &self.0
    }

    /// Build a borrowed params slice suitable for rusqlite execution.
    #[must_use]
    pub fn as_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.0.iter().map(|v| v as &dyn rusqlite::ToSql).collect()
    }
}

impl<'a> ParamConverter<'a> for Params {
    type Converted = Params;

    fn convert_sql_params(
        params: &'a [RowValues],
        _mode: ConversionMode,
    ) -> Result<Self::Converted, SqlConsoleError> {
        Self::convert(params)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn dates_and_bools_become_sqlite_storage_classes() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let converted = Params::convert(&[
            RowValues::Date(date),
            RowValues::Bool(true),
            RowValues::Null,
            RowValues::Text("F100".into()),
        ])
        .unwrap();
        assert_eq!(
            converted.as_values(),
            &[
                Value::Text("2025-06-01".into()),
                Value::Integer(1),
                Value::Null,
                Value::Text("F100".into()),
            ]
        );
        assert_eq!(converted.as_refs().len(), 4);
    }
}
