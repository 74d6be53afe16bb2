//! Application configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use board_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Unparsable values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| {
                let defaults = DatabaseConfig::new(url);
                DatabaseConfig {
                    max_connections: parse_or(
                        &lookup,
                        "DB_MAX_CONNECTIONS",
                        defaults.max_connections,
                    ),
                    min_connections: parse_or(
                        &lookup,
                        "DB_MIN_CONNECTIONS",
                        defaults.min_connections,
                    ),
                    connect_timeout: Duration::from_secs(parse_or(
                        &lookup,
                        "DB_CONNECT_TIMEOUT_SECS",
                        defaults.connect_timeout.as_secs(),
                    )),
                    sql_logging: flag(&lookup, "DB_SQL_LOGGING"),
                    ..defaults
                }
            });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080),
            database,
            run_migrations: flag(&lookup, "RUN_MIGRATIONS"),
        }
    }
}

pub(crate) fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> bool {
    lookup(key)
        .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
