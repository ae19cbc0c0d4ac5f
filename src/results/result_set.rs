use std::collections::HashMap;
use std::sync::Arc;

use super::row::ResultRow;
use crate::error::SqlConsoleError;

/// A materialized query result
///
/// Rows are kept in the order the backend delivered them; this layer never sorts.
/// Every row has exactly as many values as there are column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    rows: Vec<ResultRow>,
    /// Column names shared by all rows (to avoid duplicating in each row)
    column_names: Arc<Vec<String>>,
    column_index_cache: Arc<HashMap<String, usize>>,
}

impl ResultSet {
    /// Create an empty result set for the given result metadata.
    #[must_use]
    pub fn new(column_names: Vec<String>) -> ResultSet {
        Self::with_capacity(column_names, 0)
    }

    /// Create an empty result set with room for `capacity` rows.
    #[must_use]
    pub fn with_capacity(column_names: Vec<String>, capacity: usize) -> ResultSet {
        let cache = column_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect::<HashMap<_, _>>();
        ResultSet {
            rows: Vec::with_capacity(capacity),
            column_names: Arc::new(column_names),
            column_index_cache: Arc::new(cache),
        }
    }

    /// Append one row.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ExecutionError` if the row's width differs from the column count.
    pub fn add_row_values(&mut self, values: Vec<Option<String>>) -> Result<(), SqlConsoleError> {
        if values.len() != self.column_names.len() {
            return Err(SqlConsoleError::ExecutionError(format!(
                "row has {} values but the result has {} columns",
                values.len(),
                self.column_names.len()
            )));
        }
        self.rows.push(ResultRow {
            column_names: Arc::clone(&self.column_names),
            values,
            column_index_cache: Arc::clone(&self.column_index_cache),
        });
        Ok(())
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRow> {
        self.rows.iter()
    }

    /// First value of the first row, the shape returned by scalar queries like `SELECT MAX(id)`.
    #[must_use]
    pub fn scalar(&self) -> Option<&str> {
        self.rows.first().and_then(|row| row.get_by_index(0))
    }

    /// Drop the metadata and keep the plain value grid.
    #[must_use]
    pub fn into_values(self) -> Vec<Vec<Option<String>>> {
        self.rows.into_iter().map(ResultRow::into_values).collect()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultRow;
    type IntoIter = std::slice::Iter<'a, ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flights() -> ResultSet {
        let mut rs = ResultSet::new(vec!["FlightNumber".into(), "PlaneID".into()]);
        rs.add_row_values(vec![Some("F100".into()), Some("P1".into())])
            .unwrap();
        rs.add_row_values(vec![Some("F200".into()), None]).unwrap();
        rs
    }

    #[test]
    fn rows_keep_insertion_order_and_width() {
        let rs = flights();
        assert_eq!(rs.len(), 2);
        assert_eq!(rs.rows()[0].get("FlightNumber"), Some("F100"));
        assert_eq!(rs.rows()[1].get("FlightNumber"), Some("F200"));
        assert!(rs.iter().all(|row| row.len() == rs.column_count()));
    }

    #[test]
    fn mismatched_row_width_is_rejected() {
        let mut rs = flights();
        let err = rs.add_row_values(vec![Some("F300".into())]).unwrap_err();
        assert!(err.is_execution());
        assert_eq!(rs.len(), 2);
    }

    #[test]
    fn null_values_stay_distinguishable() {
        let rs = flights();
        let row = &rs.rows()[1];
        assert!(row.is_null(1));
        assert_eq!(row.get("PlaneID"), None);
        assert!(!row.is_null(0));
    }

    #[test]
    fn column_lookup_falls_back_to_case_insensitive() {
        let rs = flights();
        assert_eq!(rs.rows()[0].get("flightnumber"), Some("F100"));
        assert_eq!(rs.rows()[0].get("missing"), None);
    }

    #[test]
    fn empty_result_is_valid() {
        let rs = ResultSet::new(vec!["x".into()]);
        assert!(rs.is_empty());
        assert_eq!(rs.scalar(), None);
        assert_eq!(rs.column_names(), ["x".to_string()]);
    }
}
