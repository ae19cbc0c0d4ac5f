//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and traits
//! so callers can get started with a single `use`.

pub use crate::config::ConnectionConfig;
pub use crate::error::SqlConsoleError;
pub use crate::executor::{NO_SEQUENCE_VALUE, QueryExecutor, TabularExecutor};
pub use crate::format::TableStyle;
pub use crate::results::{ExecutionMode, ExecutionOutcome, ResultRow, ResultSet};
pub use crate::statement::QueryAndParams;
pub use crate::translation::{PlaceholderStyle, translate_placeholders};
pub use crate::types::{DatabaseType, RowValues};

#[cfg(feature = "postgres")]
pub use crate::postgres::{PostgresOptions, PostgresOptionsBuilder};
#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteOptions, SqliteOptionsBuilder};
