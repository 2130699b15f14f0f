use std::{env, fmt::Display, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use sea_orm::ConnectOptions;
use tracing::info;

const DEFAULT_DATABASE_URL: &str = "sqlite://startuplens.sqlite?mode=rwc";

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Default cap on search results when the caller gives no `limit`.
    pub search_limit: u64,
    /// Requests per minute per client IP on the API routes; 0 disables limiting.
    pub rate_limit_per_minute: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| {
                info!("DATABASE_URL not set, using default: {DEFAULT_DATABASE_URL}");
                DEFAULT_DATABASE_URL.to_string()
            }),
            max_connections: try_load(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: try_load(&lookup, "PORT", 3000)?,
            search_limit: try_load(&lookup, "SEARCH_LIMIT", 50)?,
            rate_limit_per_minute: try_load(&lookup, "RATE_LIMIT_PER_MINUTE", 120)?,
        };

        if config.max_connections == 0 {
            return Err(anyhow!("DATABASE_MAX_CONNECTIONS must be at least 1"));
        }
        if config.search_limit == 0 {
            return Err(anyhow!("SEARCH_LIMIT must be at least 1"));
        }

        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.database_url.clone());
        options
            .max_connections(self.max_connections)
            .connect_timeout(Duration::from_secs(20))
            .acquire_timeout(Duration::from_secs(20))
            .sqlx_logging(false);
        options
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw:?}")),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.port, 3000);
        assert_eq!(config.search_limit, 50);
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn values_are_read_and_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/startuplens"),
            ("HOST", "0.0.0.0"),
            ("PORT", " 8080 "),
            ("SEARCH_LIMIT", "10"),
            ("RATE_LIMIT_PER_MINUTE", "0"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "postgres://localhost/startuplens");
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.search_limit, 10);
        assert_eq!(config.rate_limit_per_minute, 0);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(Config::from_lookup(lookup_from(&[("SEARCH_LIMIT", "0")])).is_err());
    }
}
