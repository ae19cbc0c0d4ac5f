use serde::Serialize;

use crate::error::SqlConsoleError;

/// Options for connecting to a `PostgreSQL` server.
///
/// The connection URL is assembled from host, port, and database name; user and password are
/// passed separately.
#[derive(Debug, Clone, Serialize)]
pub struct PostgresOptions {
    pub host: String,
    pub port: Option<u16>,
    pub dbname: String,
    pub user: Option<String>,
    #[serde(skip)]
    pub password: String,
    pub translate_placeholders: bool,
}

impl PostgresOptions {
    #[must_use]
    pub fn new(dbname: impl Into<String>) -> Self {
        Self {
            host: "localhost".to_string(),
            port: None,
            dbname: dbname.into(),
            user: None,
            password: String::new(),
            translate_placeholders: false,
        }
    }

    #[must_use]
    pub fn builder(dbname: impl Into<String>) -> PostgresOptionsBuilder {
        PostgresOptionsBuilder {
            opts: Self::new(dbname),
        }
    }

    /// The URL shown to the user when connecting, e.g. `postgresql://localhost:5432/airline`.
    #[must_use]
    pub fn connection_url(&self) -> String {
        match self.port {
            Some(port) => format!("postgresql://{}:{}/{}", self.host, port, self.dbname),
            None => format!("postgresql://{}/{}", self.host, self.dbname),
        }
    }

    /// Validate and convert into a driver config.
    ///
    /// # Errors
    /// Returns `SqlConsoleError::ConfigError` if a required field is missing.
    pub fn to_pg_config(&self) -> Result<tokio_postgres::Config, SqlConsoleError> {
        if self.dbname.trim().is_empty() {
            return Err(SqlConsoleError::ConfigError("dbname is required".to_string()));
        }
        if self.host.trim().is_empty() {
            return Err(SqlConsoleError::ConfigError("host is required".to_string()));
        }
        let Some(port) = self.port else {
            return Err(SqlConsoleError::ConfigError("port is required".to_string()));
        };
        let user = match self.user.as_deref() {
            Some(user) if !user.trim().is_empty() => user,
            _ => return Err(SqlConsoleError::ConfigError("user is required".to_string())),
        };

        let mut cfg = tokio_postgres::Config::new();
        cfg.host(&self.host).port(port).dbname(&self.dbname).user(user);
        if !self.password.is_empty() {
            cfg.password(&self.password);
        }
        Ok(cfg)
    }
}

/// Fluent builder for `PostgreSQL` options.
#[derive(Debug, Clone)]
pub struct PostgresOptionsBuilder {
    opts: PostgresOptions,
}

impl PostgresOptionsBuilder {
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.opts.host = host.into();
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.opts.port = Some(port);
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.opts.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.opts.password = password.into();
        self
    }

    #[must_use]
    pub fn translation(mut self, translate_placeholders: bool) -> Self {
        self.opts.translate_placeholders = translate_placeholders;
        self
    }

    #[must_use]
    pub fn finish(self) -> PostgresOptions {
        self.opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_assembled_from_host_port_and_dbname() {
        let opts = PostgresOptions::builder("airline").port(5432).user("me").finish();
        assert_eq!(opts.connection_url(), "postgresql://localhost:5432/airline");
    }

    #[test]
    fn missing_fields_are_config_errors() {
        let no_port = PostgresOptions::builder("airline").user("me").finish();
        let err = no_port.to_pg_config().unwrap_err();
        assert!(matches!(err, SqlConsoleError::ConfigError(msg) if msg.contains("port")));

        let no_user = PostgresOptions::builder("airline").port(5432).finish();
        assert!(matches!(
            no_user.to_pg_config(),
            Err(SqlConsoleError::ConfigError(msg)) if msg.contains("user")
        ));

        let no_db = PostgresOptions::builder(" ").port(5432).user("me").finish();
        assert!(no_db.to_pg_config().is_err());
    }

    #[test]
    fn empty_password_is_not_sent() {
        let cfg = PostgresOptions::builder("airline")
            .port(6000)
            .user("me")
            .finish()
            .to_pg_config()
            .unwrap();
        assert!(cfg.get_password().is_none());
        assert_eq!(cfg.get_ports(), &[6000]);
        assert_eq!(cfg.get_user(), Some("me"));
    }
}
