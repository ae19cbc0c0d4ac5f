use serde::Serialize;

/// Options for opening a `SQLite` database.
///
/// `db_path` may be a file path or `:memory:`. Placeholder translation is on by default so the
/// same `$N` statements run against either backend.
#[derive(Debug, Clone, Serialize)]
pub struct SqliteOptions {
    pub db_path: String,
    pub translate_placeholders: bool,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            translate_placeholders: true,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(":memory:")
    }

    #[must_use]
    pub fn builder(db_path: impl Into<String>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }

    #[must_use]
    pub fn with_translation(mut self, translate_placeholders: bool) -> Self {
        self.translate_placeholders = translate_placeholders;
        self
    }

    /// The location shown to the user when connecting.
    #[must_use]
    pub fn connection_url(&self) -> String {
        format!("sqlite://{}", self.db_path)
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn translation(mut self, translate_placeholders: bool) -> Self {
        self.opts.translate_placeholders = translate_placeholders;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_defaults_on() {
        let opts = SqliteOptions::builder("/tmp/airline.db").finish();
        assert!(opts.translate_placeholders);
        assert_eq!(opts.connection_url(), "sqlite:///tmp/airline.db");

        let off = SqliteOptions::in_memory().with_translation(false);
        assert!(!off.translate_placeholders);
        assert_eq!(off.db_path, ":memory:");
    }
}
