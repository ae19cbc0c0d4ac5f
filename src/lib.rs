//! Tabular SQL command executor over `PostgreSQL` and `SQLite`, plus the airline console
//! that drives it.

#[cfg(not(any(feature = "postgres", feature = "sqlite")))]
compile_error!("enable at least one backend feature: `postgres` or `sqlite`");

pub mod airline;
pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod format;
pub mod logging;
pub mod prelude;
pub mod results;
pub mod statement;
#[cfg(feature = "test-utils-airline")]
pub mod test_utils;
pub mod translation;
pub mod types;

mod adapters;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use config::ConnectionConfig;
pub use error::SqlConsoleError;
pub use executor::{NO_SEQUENCE_VALUE, QueryExecutor, TabularExecutor};
