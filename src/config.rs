use std::{net::SocketAddr, str::FromStr, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 16;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = parse_or(&lookup, "BIND_ADDR", || SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)))?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", || DEFAULT_MAX_CONNECTIONS)?;
        let request_timeout = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", || DEFAULT_REQUEST_TIMEOUT.as_secs())
            .map(Duration::from_secs)?;

        Ok(Config {
            database_url,
            bind_addr,
            max_connections,
            request_timeout,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: impl FnOnce() -> T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default()),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(env(&[("DATABASE_URL", "sqlite://app.db")])).unwrap();
        assert_eq!(config.database_url, "sqlite://app.db");
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.max_connections, 16);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(env(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("REQUEST_TIMEOUT_SECS", " 30 "),
        ])).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn database_url_is_required() {
        let err = Config::from_lookup(env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = Config::from_lookup(env(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "REQUEST_TIMEOUT_SECS", .. }));
    }
}
