// src/config.rs
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::str::FromStr;
use std::{env, time::Duration};
use thiserror::Error;

const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 25;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Clone, Debug)]
pub struct AppConfig {
    connect_options: PgConnectOptions,
    max_connections: u32,
    acquire_timeout: Duration,
    statement_timeout: Option<Duration>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Build configuration from environment variables. A `.env` file, when
    /// present, populates variables that are not already set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `DATABASE_URL` wins when set. Otherwise the connection is assembled from
    /// `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` and
    /// `DB_SSLMODE`; host, user and name are then required. The parts are
    /// passed to the driver as-is, so credentials need no URL escaping.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let connect_options = match get("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url)
                .map_err(|err| ConfigError::Invalid(format!("DATABASE_URL: {err}")))?,
            None => {
                let host = get("DB_HOST").ok_or(ConfigError::Missing("DB_HOST"))?;
                let user = get("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
                let name = get("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?;
                let port = parse_or("DB_PORT", get("DB_PORT"), DEFAULT_DB_PORT)?;
                let ssl_mode = match get("DB_SSLMODE") {
                    Some(raw) => PgSslMode::from_str(raw.trim()).map_err(|_| {
                        ConfigError::Invalid(format!("DB_SSLMODE is not a valid mode: '{raw}'"))
                    })?,
                    None => PgSslMode::Disable,
                };

                let mut options = PgConnectOptions::new_without_pgpass()
                    .host(&host)
                    .port(port)
                    .username(&user)
                    .database(&name)
                    .ssl_mode(ssl_mode);
                if let Some(password) = get("DB_PASSWORD") {
                    options = options.password(&password);
                }
                options
            }
        };

        let max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            get("DB_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DB_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }

        let acquire_timeout_secs = parse_or(
            "DB_ACQUIRE_TIMEOUT_SECS",
            get("DB_ACQUIRE_TIMEOUT_SECS"),
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?;

        let statement_timeout = get("DB_STATEMENT_TIMEOUT_MS")
            .map(|raw| parse::<u64>("DB_STATEMENT_TIMEOUT_MS", &raw))
            .transpose()?
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        Ok(Self {
            connect_options,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            statement_timeout,
        })
    }

    pub fn connect_options(&self) -> &PgConnectOptions {
        &self.connect_options
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn acquire_timeout(&self) -> Duration {
        self.acquire_timeout
    }

    /// Server-side limit applied to every statement, if configured.
    pub fn statement_timeout(&self) -> Option<Duration> {
        self.statement_timeout
    }
}

fn parse<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| {
        ConfigError::Invalid(format!("{key} must be a non-negative integer, got '{raw}'"))
    })
}

fn parse_or<T: FromStr>(
    key: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    raw.map_or(Ok(default), |value| parse(key, &value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn database_url_takes_precedence() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://app@db:6543/blog"),
            ("DB_HOST", "ignored"),
        ]))
        .unwrap();
        let options = config.connect_options();
        assert_eq!(options.get_host(), "db");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "app");
        assert_eq!(options.get_database(), Some("blog"));
        assert_eq!(config.max_connections(), 25);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(5));
        assert!(config.statement_timeout().is_none());
    }

    #[test]
    fn composes_connection_from_parts() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DB_HOST", "localhost"),
            ("DB_USER", "blog"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "blogdb"),
        ]))
        .unwrap();
        let options = config.connect_options();
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "blog");
        assert_eq!(options.get_database(), Some("blogdb"));
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Disable));
    }

    #[test]
    fn reserved_characters_in_credentials_are_kept_verbatim() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DB_HOST", "localhost"),
            ("DB_USER", "blog"),
            ("DB_PASSWORD", "p@ss/w#rd"),
            ("DB_NAME", "blogdb"),
            ("DB_SSLMODE", "require"),
        ]))
        .unwrap();
        let options = config.connect_options();
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "blog");
        assert_eq!(options.get_database(), Some("blogdb"));
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Require));
        assert!(format!("{options:?}").contains("\"p@ss/w#rd\""));
    }

    #[test]
    fn unknown_sslmode_and_malformed_url_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("DB_HOST", "localhost"),
            ("DB_USER", "blog"),
            ("DB_NAME", "blogdb"),
            ("DB_SSLMODE", "sometimes"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("DB_SSLMODE")));

        let err = AppConfig::from_lookup(lookup(&[(
            "DATABASE_URL",
            "postgres://app@db:notaport/blog",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("DATABASE_URL")));
    }

    #[test]
    fn missing_host_is_reported() {
        let err = AppConfig::from_lookup(lookup(&[("DB_USER", "blog"), ("DB_NAME", "blogdb")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DB_HOST")));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://app@db/blog"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("DB_MAX_CONNECTIONS")));

        let err = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://app@db/blog"),
            ("DB_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn pool_tuning_is_read() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://app@db/blog"),
            ("DB_MAX_CONNECTIONS", "8"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "2"),
            ("DB_STATEMENT_TIMEOUT_MS", "1500"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections(), 8);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(2));
        assert_eq!(
            config.statement_timeout(),
            Some(Duration::from_millis(1500))
        );
    }
}
