//! Connection settings shared by the API server and the seed runner.
//!
//! Built once at process start and passed by reference to whatever needs
//! it. Binaries call `dotenvy::dotenv()` before [`Settings::from_env`] so a
//! local `.env` file is honoured.

use crate::error::CoreError;

/// Database and cache connection strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Postgres connection string (`DATABASE_URL`). Required by anything
    /// that touches the database.
    pub database_url: Option<String>,
    /// Cache connection string (`REDIS_URL`, falling back to `CACHE_URL`).
    /// Optional; when unset the cache is reported healthy.
    pub cache_url: Option<String>,
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// | Env Var        | Meaning                              |
    /// |----------------|--------------------------------------|
    /// | `DATABASE_URL` | Postgres connection string           |
    /// | `REDIS_URL`    | Cache connection string              |
    /// | `CACHE_URL`    | Cache fallback when `REDIS_URL` unset |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup. Empty values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            database_url: get("DATABASE_URL"),
            cache_url: get("REDIS_URL").or_else(|| get("CACHE_URL")),
        }
    }

    /// Replace the database URL when an override is given (e.g. from a CLI
    /// flag). `None` keeps the environment value.
    pub fn with_database_url(mut self, database_url: Option<String>) -> Self {
        if let Some(url) = database_url.filter(|v| !v.trim().is_empty()) {
            self.database_url = Some(url);
        }
        self
    }

    /// The database URL, or a configuration error when it was never set.
    pub fn database_url(&self) -> Result<&str, CoreError> {
        self.database_url.as_deref().ok_or_else(|| {
            CoreError::Config("DATABASE_URL is required for database access.".into())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_database_and_redis_urls() {
        let settings = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/vibes"),
            ("REDIS_URL", "redis://localhost:6379"),
            ("CACHE_URL", "redis://other:6379"),
        ]));
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/vibes")
        );
        assert_eq!(settings.cache_url.as_deref(), Some("redis://localhost:6379"));
    }

    #[test]
    fn cache_url_falls_back_when_redis_url_missing() {
        let settings = Settings::from_lookup(lookup(&[("CACHE_URL", "redis://cache:6380")]));
        assert_eq!(settings.cache_url.as_deref(), Some("redis://cache:6380"));
    }

    #[test]
    fn empty_values_are_unset() {
        let settings = Settings::from_lookup(lookup(&[("DATABASE_URL", "  "), ("REDIS_URL", "")]));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn missing_database_url_is_config_error() {
        let settings = Settings::default();
        assert_matches!(settings.database_url(), Err(CoreError::Config(_)));
    }

    #[test]
    fn override_replaces_environment_value() {
        let settings = Settings::from_lookup(lookup(&[("DATABASE_URL", "postgres://env/db")]))
            .with_database_url(Some("postgres://cli/db".into()));
        assert_eq!(settings.database_url().unwrap(), "postgres://cli/db");

        let kept = Settings::from_lookup(lookup(&[("DATABASE_URL", "postgres://env/db")]))
            .with_database_url(None);
        assert_eq!(kept.database_url().unwrap(), "postgres://env/db");
    }
}
