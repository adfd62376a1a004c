use super::RedisConfig;
use anyhow::{Context, Result, anyhow};
use std::{path::PathBuf, time::Duration};

const DEFAULT_KEY_PREFIX: &str = "clinic:session";
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 10;
const APP_DIR: &str = "clinic-desktop";

/// Where the login session is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    File(PathBuf),
    Redis(RedisConfig),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: SessionBackend,
    pub key_prefix: String,
    pub auth_api_url: String,
    pub auth_timeout: Duration,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_api_url =
            lookup("AUTH_API_URL").context("Missing environment variable: AUTH_API_URL")?;

        let auth_timeout_secs = match lookup("AUTH_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("AUTH_TIMEOUT_SECS must be a valid u64 integer")?,
            None => DEFAULT_AUTH_TIMEOUT_SECS,
        };

        let key_prefix =
            lookup("SESSION_KEY_PREFIX").unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string());

        let backend_name = lookup("SESSION_BACKEND").unwrap_or_else(|| "file".to_string());

        let backend = match backend_name.as_str() {
            "memory" => SessionBackend::Memory,
            "file" => {
                let path = lookup("SESSION_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_session_file);
                SessionBackend::File(path)
            }
            "redis" => {
                let host =
                    lookup("REDIS_HOST").context("Missing environment variable: REDIS_HOST")?;

                let port = match lookup("REDIS_PORT") {
                    Some(raw) => raw
                        .parse::<u16>()
                        .context("REDIS_PORT must be a valid u16 integer")?,
                    None => 6379,
                };

                let db = match lookup("REDIS_DB") {
                    Some(raw) => raw
                        .parse::<u8>()
                        .context("REDIS_DB must be a valid u8 integer")?,
                    None => 0,
                };

                let password = lookup("REDIS_PASSWORD").filter(|pw| !pw.is_empty());

                SessionBackend::Redis(RedisConfig::new(host, port, db, password))
            }
            other => {
                return Err(anyhow!(
                    "SESSION_BACKEND must be 'file', 'redis' or 'memory', got '{}'",
                    other
                ));
            }
        };

        let is_dev = flag(lookup("DEV_MODE"));
        let enable_file_log = flag(lookup("ENABLE_FILE_LOG"));

        Ok(Self {
            backend,
            key_prefix,
            auth_api_url,
            auth_timeout: Duration::from_secs(auth_timeout_secs),
            is_dev,
            enable_file_log,
        })
    }
}

fn flag(value: Option<String>) -> bool {
    value.map(|v| v == "true" || v == "1").unwrap_or(false)
}

fn default_session_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_file_backend() {
        let config = config_from(&[("AUTH_API_URL", "http://localhost:3000")]).unwrap();

        match &config.backend {
            SessionBackend::File(path) => assert!(path.ends_with("session.json")),
            other => panic!("unexpected backend {other:?}"),
        }
        assert_eq!(config.key_prefix, DEFAULT_KEY_PREFIX);
        assert_eq!(config.auth_timeout, Duration::from_secs(10));
        assert!(!config.is_dev);
        assert!(!config.enable_file_log);
    }

    #[test]
    fn explicit_session_file() {
        let config = config_from(&[
            ("AUTH_API_URL", "http://localhost:3000"),
            ("SESSION_FILE", "/tmp/clinic/session.json"),
            ("DEV_MODE", "1"),
            ("ENABLE_FILE_LOG", "true"),
        ])
        .unwrap();

        assert_eq!(
            config.backend,
            SessionBackend::File(PathBuf::from("/tmp/clinic/session.json"))
        );
        assert!(config.is_dev);
        assert!(config.enable_file_log);
    }

    #[test]
    fn redis_backend() {
        let config = config_from(&[
            ("AUTH_API_URL", "http://localhost:3000"),
            ("SESSION_BACKEND", "redis"),
            ("REDIS_HOST", "cache"),
            ("REDIS_PORT", "6380"),
            ("REDIS_DB", "2"),
            ("REDIS_PASSWORD", ""),
        ])
        .unwrap();

        assert_eq!(
            config.backend,
            SessionBackend::Redis(RedisConfig::new("cache".into(), 6380, 2, None))
        );
    }

    #[test]
    fn missing_auth_url_is_an_error() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("AUTH_API_URL"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(
            config_from(&[
                ("AUTH_API_URL", "http://localhost:3000"),
                ("SESSION_BACKEND", "sqlite"),
            ])
            .is_err()
        );
        assert!(
            config_from(&[
                ("AUTH_API_URL", "http://localhost:3000"),
                ("AUTH_TIMEOUT_SECS", "soon"),
            ])
            .is_err()
        );
        assert!(
            config_from(&[
                ("AUTH_API_URL", "http://localhost:3000"),
                ("SESSION_BACKEND", "redis"),
            ])
            .is_err()
        );
    }
}
