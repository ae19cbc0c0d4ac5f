// SQLite backend: one rusqlite connection driven from tokio's blocking pool.
//
// - config: connection options
// - params: conversion of bind values into rusqlite values
// - query: result extraction
// - connection: the owned connection and statement execution

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use connection::SqliteConnection;
pub use params::Params;
pub use query::build_result_set;
