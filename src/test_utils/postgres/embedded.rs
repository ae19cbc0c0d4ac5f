use postgresql_embedded::PostgreSQL;

use crate::postgres::PostgresOptions;

/// Represents a running embedded `PostgreSQL` instance.
pub struct EmbeddedPostgres {
    pub postgresql: PostgreSQL,
    pub port: u16,
    /// Options that reach the test database with the server's generated credentials
    pub options: PostgresOptions,
}

impl EmbeddedPostgres {
    /// Stop the server.
    ///
    /// # Errors
    /// Returns an error if the server does not shut down.
    pub async fn stop(self) -> Result<(), Box<dyn std::error::Error>> {
        self.postgresql.stop().await?;
        Ok(())
    }
}

/// Set up an embedded `PostgreSQL` instance with an empty database named `dbname`.
///
/// # Errors
/// Returns an error if the embedded server cannot be set up, started, or if the database cannot
/// be created.
pub async fn setup_postgres_embedded(
    dbname: &str,
) -> Result<EmbeddedPostgres, Box<dyn std::error::Error>> {
    let mut postgresql = PostgreSQL::default();

    // bundled binaries, so nothing is downloaded here
    postgresql.setup().await?;
    postgresql.start().await?;

    let settings = postgresql.settings();
    let port = settings.port;
    let options = PostgresOptions::builder(dbname)
        .host(settings.host.clone())
        .port(port)
        .user(settings.username.clone())
        .password(settings.password.clone())
        .finish();

    postgresql.create_database(dbname).await?;
    tracing::info!(port, dbname, "embedded postgres started");

    Ok(EmbeddedPostgres {
        postgresql,
        port,
        options,
    })
}
