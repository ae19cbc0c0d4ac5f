use crate::types::RowValues;

/// A statement and its bind values bundled together
///
/// Placeholders are written `PostgreSQL`-style (`$1`, `$2`, ...); the executor translates them
/// for backends that use a different style. A statement with no parameters is sent as-is.
///
/// ```rust
/// use sql_console::prelude::*;
///
/// let stmt = QueryAndParams::new(
///     "SELECT PlaneID FROM Plane WHERE Make = $1",
///     vec![RowValues::Text("Boeing".into())],
/// );
/// assert_eq!(stmt.params.len(), 1);
///
/// let plain: QueryAndParams = "SELECT 1".into();
/// assert!(plain.params.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL statement text
    pub query: String,
    /// The values bound to the statement's placeholders, in order
    pub params: Vec<RowValues>,
}

impl QueryAndParams {
    pub fn new(query: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }
}

impl From<&str> for QueryAndParams {
    fn from(query: &str) -> Self {
        Self::new_without_params(query)
    }
}

impl From<String> for QueryAndParams {
    fn from(query: String) -> Self {
        Self::new_without_params(query)
    }
}

impl From<&String> for QueryAndParams {
    fn from(query: &String) -> Self {
        Self::new_without_params(query.as_str())
    }
}

impl<Q: Into<String>> From<(Q, Vec<RowValues>)> for QueryAndParams {
    fn from((query, params): (Q, Vec<RowValues>)) -> Self {
        Self::new(query, params)
    }
}
