use std::collections::HashMap;
use std::path::Path;

use crate::error::RqliteDbError;

/// Address used when no `url` option is supplied.
pub const DEFAULT_URL: &str = "http://localhost:4001";

/// Options for reaching an rqlite node.
///
/// Built through `new`, `builder`, `from_map`, or `Default`, so the URL is
/// always validated and has no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    url: String,
    database: Option<String>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            database: None,
        }
    }
}

impl ConnectionOptions {
    /// Options pointing at `url`.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::ConfigError` if `url` is not an `http://` or `https://` URL.
    pub fn new(url: impl Into<String>) -> Result<Self, RqliteDbError> {
        Ok(Self {
            url: normalize_url(url.into())?,
            database: None,
        })
    }

    #[must_use]
    pub fn builder() -> ConnectionOptionsBuilder {
        ConnectionOptionsBuilder::new()
    }

    /// Build options from a host-supplied string mapping.
    ///
    /// Recognized keys are `url` and `database`; anything else is ignored.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::ConfigError` if `url` is present but malformed.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, RqliteDbError> {
        let mut builder = ConnectionOptionsBuilder::new();
        if let Some(url) = map.get("url") {
            builder = builder.url(url.clone());
        }
        if let Some(database) = map.get("database") {
            builder = builder.database(database.clone());
        }
        builder.finish()
    }

    /// Base URL of the node, without a trailing slash.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Local database file, only consulted by `db_file_exists`.
    #[must_use]
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Whether `database` names a file that exists locally.
    #[must_use]
    pub fn db_file_exists(&self) -> bool {
        self.database
            .as_deref()
            .is_some_and(|path| Path::new(path).exists())
    }
}

/// Fluent builder for `ConnectionOptions`.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptionsBuilder {
    url: Option<String>,
    database: Option<String>,
}

impl ConnectionOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Finish the builder.
    ///
    /// # Errors
    ///
    /// Returns `RqliteDbError::ConfigError` if the URL is malformed.
    pub fn finish(self) -> Result<ConnectionOptions, RqliteDbError> {
        let url = match self.url {
            Some(url) => normalize_url(url)?,
            None => DEFAULT_URL.to_string(),
        };
        Ok(ConnectionOptions {
            url,
            database: self.database,
        })
    }
}

fn normalize_url(url: String) -> Result<String, RqliteDbError> {
    let trimmed = url.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(RqliteDbError::ConfigError(format!(
            "url must start with http:// or https://, got {url:?}"
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_node() {
        let opts = ConnectionOptions::default();
        assert_eq!(opts.url(), "http://localhost:4001");
        assert!(opts.database().is_none());
        assert!(!opts.db_file_exists());
    }

    #[test]
    fn map_without_url_uses_default() {
        let mut map = HashMap::new();
        map.insert("database".to_string(), "app.db".to_string());
        map.insert("flags".to_string(), "ignored".to_string());
        let opts = ConnectionOptions::from_map(&map).unwrap();
        assert_eq!(opts.url(), DEFAULT_URL);
        assert_eq!(opts.database(), Some("app.db"));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let opts = ConnectionOptions::new("http://10.0.0.5:4001/").unwrap();
        assert_eq!(opts.url(), "http://10.0.0.5:4001");
    }

    #[test]
    fn map_with_url_is_validated_and_normalized() {
        let mut map = HashMap::new();
        map.insert("url".to_string(), " https://db.internal:4001/ ".to_string());
        let opts = ConnectionOptions::from_map(&map).unwrap();
        assert_eq!(opts.url(), "https://db.internal:4001");
        assert!(opts.database().is_none());

        map.insert("url".to_string(), "db.internal:4001".to_string());
        assert!(matches!(
            ConnectionOptions::from_map(&map),
            Err(RqliteDbError::ConfigError(_))
        ));
    }

    #[test]
    fn rejects_non_http_url() {
        let err = ConnectionOptions::builder().url("localhost:4001").finish();
        assert!(matches!(err, Err(RqliteDbError::ConfigError(_))));
    }

    #[test]
    fn db_file_exists_checks_the_filesystem() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let opts = ConnectionOptions::builder()
            .database(file.path().to_string_lossy().to_string())
            .finish()
            .unwrap();
        assert!(opts.db_file_exists());

        let missing = ConnectionOptions::builder()
            .database("/definitely/not/here.db")
            .finish()
            .unwrap();
        assert!(!missing.db_file_exists());
    }
}
