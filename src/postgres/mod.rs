// PostgreSQL backend: one tokio-postgres client plus its connection task.
//
// - config: connection options and validation
// - params: conversion of bind values into wire parameters
// - query: result extraction for both query protocols
// - connection: the owned client and statement execution

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

pub use config::{PostgresOptions, PostgresOptionsBuilder};
pub use connection::PostgresConnection;
pub use params::Params;
pub use query::{PgNumeric, PgText, build_result_set_from_statement, postgres_extract_value};
