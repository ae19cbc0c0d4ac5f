use serde::Serialize;

#[cfg(feature = "postgres")]
use crate::postgres::PostgresOptions;
#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteOptions;
use crate::types::DatabaseType;

/// Which backend to open and how.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum ConnectionConfig {
    #[cfg(feature = "postgres")]
    Postgres(PostgresOptions),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteOptions),
}

impl ConnectionConfig {
    #[must_use]
    pub fn db_type(&self) -> DatabaseType {
        match self {
            #[cfg(feature = "postgres")]
            ConnectionConfig::Postgres(_) => DatabaseType::Postgres,
            #[cfg(feature = "sqlite")]
            ConnectionConfig::Sqlite(_) => DatabaseType::Sqlite,
        }
    }

    /// The URL echoed at startup.
    #[must_use]
    pub fn connection_url(&self) -> String {
        match self {
            #[cfg(feature = "postgres")]
            ConnectionConfig::Postgres(opts) => opts.connection_url(),
            #[cfg(feature = "sqlite")]
            ConnectionConfig::Sqlite(opts) => opts.connection_url(),
        }
    }

    #[must_use]
    pub fn translate_placeholders(&self) -> bool {
        match self {
            #[cfg(feature = "postgres")]
            ConnectionConfig::Postgres(opts) => opts.translate_placeholders,
            #[cfg(feature = "sqlite")]
            ConnectionConfig::Sqlite(opts) => opts.translate_placeholders,
        }
    }
}

#[cfg(feature = "postgres")]
impl From<PostgresOptions> for ConnectionConfig {
    fn from(opts: PostgresOptions) -> Self {
        ConnectionConfig::Postgres(opts)
    }
}

#[cfg(feature = "sqlite")]
impl From<SqliteOptions> for ConnectionConfig {
    fn from(opts: SqliteOptions) -> Self {
        ConnectionConfig::Sqlite(opts)
    }
}

#[cfg(all(test, feature = "postgres", feature = "sqlite"))]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_backend_tag_and_without_password() {
        let pg: ConnectionConfig = PostgresOptions::builder("airline")
            .port(5432)
            .user("me")
            .password("secret")
            .finish()
            .into();
        let json = serde_json::to_value(&pg).unwrap();
        assert_eq!(json["backend"], "postgres");
        assert_eq!(json["dbname"], "airline");
        assert!(json.get("password").is_none());
        assert_eq!(pg.db_type(), DatabaseType::Postgres);

        let lite: ConnectionConfig = SqliteOptions::in_memory().into();
        assert_eq!(lite.db_type(), DatabaseType::Sqlite);
        assert!(lite.translate_placeholders());
        assert_eq!(lite.connection_url(), "sqlite://:memory:");
    }
}
