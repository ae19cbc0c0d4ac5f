//! Fixtures shared by the integration tests.

pub mod airline;

/// Embedded `PostgreSQL` for integration tests
#[cfg(feature = "test-utils-postgres")]
pub mod postgres;
