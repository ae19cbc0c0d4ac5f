use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::config::ConnectionConfig;
use crate::error::SqlConsoleError;
#[cfg(feature = "postgres")]
use crate::postgres::PostgresOptions;
#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteOptions;
use crate::types::DatabaseType;

/// Start arguments of the airline console.
#[derive(Parser, Debug, Clone, Serialize)]
#[command(author, version, about = "Menu-driven airline management console")]
pub struct Args {
    /// Database name (`PostgreSQL`) or database file (`SQLite`).
    pub dbname: String,
    /// Server port; required for `PostgreSQL`.
    pub port: Option<u16>,
    /// Login role; required for `PostgreSQL`.
    pub user: Option<String>,
    #[arg(long, value_enum, default_value_t = DatabaseType::default())]
    pub backend: DatabaseType,
    #[arg(long, default_value = "localhost")]
    pub host: String,
    #[arg(long, default_value = "")]
    #[serde(skip)]
    pub password: String,
    /// SQL script run once after connecting, e.g. a schema and seed file.
    #[arg(long)]
    pub init: Option<PathBuf>,
    /// Write diagnostics to this file instead of standard error.
    #[arg(long)]
    pub log: Option<PathBuf>,
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    /// Build backend options from the arguments.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ConfigError` if the port is `0`.
    pub fn connection_config(&self) -> Result<ConnectionConfig, SqlConsoleError> {
        match self.backend {
            #[cfg(feature = "postgres")]
            DatabaseType::Postgres => {
                let mut builder = PostgresOptions::builder(self.dbname.clone())
                    .host(self.host.clone())
                    .password(self.password.clone());
                if let Some(port) = self.port {
                    if port == 0 {
                        return Err(SqlConsoleError::ConfigError(
                            "port must be between 1 and 65535".to_string(),
                        ));
                    }
                    builder = builder.port(port);
                }
                if let Some(user) = &self.user {
                    builder = builder.user(user.clone());
                }
                Ok(builder.finish().into())
            }
            #[cfg(feature = "sqlite")]
            DatabaseType::Sqlite => Ok(SqliteOptions::new(self.dbname.clone()).into()),
        }
    }
}

#[cfg(all(test, feature = "postgres", feature = "sqlite"))]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments_build_postgres_options() {
        let args = Args::try_parse_from(["airline-console", "airline", "5432", "me"]).unwrap();
        assert_eq!(args.backend, DatabaseType::Postgres);
        let config = args.connection_config().unwrap();
        assert_eq!(config.connection_url(), "postgresql://localhost:5432/airline");
        let ConnectionConfig::Postgres(opts) = config else {
            panic!("expected postgres options");
        };
        assert_eq!(opts.user.as_deref(), Some("me"));
        assert!(opts.password.is_empty());
    }

    #[test]
    fn malformed_port_is_rejected_by_the_parser() {
        assert!(Args::try_parse_from(["airline-console", "airline", "port", "me"]).is_err());
        let zero = Args::try_parse_from(["airline-console", "airline", "0", "me"]).unwrap();
        assert!(matches!(
            zero.connection_config(),
            Err(SqlConsoleError::ConfigError(_))
        ));
    }

    #[test]
    fn sqlite_backend_only_needs_a_path() {
        let args = Args::try_parse_from([
            "airline-console",
            "/tmp/airline.db",
            "--backend",
            "sqlite",
            "--verbose",
        ])
        .unwrap();
        assert!(args.verbose);
        let config = args.connection_config().unwrap();
        assert_eq!(config.db_type(), DatabaseType::Sqlite);
        assert_eq!(config.connection_url(), "sqlite:///tmp/airline.db");
    }
}
