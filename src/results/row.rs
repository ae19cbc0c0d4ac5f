use std::collections::HashMap;
use std::sync::Arc;

/// A row from a query result
///
/// Values are kept in their textual form, in select-list order. SQL NULL is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// The column names for this row (shared across all rows in a result set)
    pub(crate) column_names: Arc<Vec<String>>,
    /// The values for this row
    pub(crate) values: Vec<Option<String>>,
    // Column name to index lookup, shared with the owning result set.
    pub(crate) column_index_cache: Arc<HashMap<String, usize>>,
}

impl ResultRow {
    /// Get the index of a column by name
    ///
    /// Lookup is exact first, then ASCII case-insensitive, since `PostgreSQL` folds unquoted
    /// identifiers to lower case while `SQLite` keeps them as written.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        if let Some(&idx) = self.column_index_cache.get(column_name) {
            return Some(idx);
        }

        self.column_names
            .iter()
            .position(|col| col.eq_ignore_ascii_case(column_name))
    }

    /// Get a value from the row by column name.
    ///
    /// Returns `None` when the column does not exist or the value is NULL.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&str> {
        self.get_column_index(column_name)
            .and_then(|idx| self.get_by_index(idx))
    }

    /// Get a value from the row by column index, `None` for NULL or out of bounds.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    /// True when the column at `index` holds SQL NULL.
    #[must_use]
    pub fn is_null(&self, index: usize) -> bool {
        matches!(self.values.get(index), Some(None))
    }

    #[must_use]
    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Option<String>> {
        self.values
    }
}
