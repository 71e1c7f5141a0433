use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::workflows::application::APPLICATIONS_TABLE;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            store: StoreConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Connection settings for the hosted applications store.
///
/// Without a URL the service falls back to an in-memory store, which is only
/// useful for local development.
#[derive(Clone)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub table: String,
    pub timeout: Duration,
}

const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

impl StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = non_blank_var("SUPABASE_URL");
        let api_key = non_blank_var("SUPABASE_ANON_KEY");
        if url.is_some() && api_key.is_none() {
            return Err(ConfigError::MissingStoreKey);
        }

        let table = non_blank_var("APP_APPLICATIONS_TABLE")
            .unwrap_or_else(|| APPLICATIONS_TABLE.to_string());

        let timeout_secs = match non_blank_var("APP_STORE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidStoreTimeout)?,
            None => DEFAULT_STORE_TIMEOUT_SECS,
        };

        Ok(Self {
            url,
            api_key,
            table,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn is_hosted(&self) -> bool {
        self.url.is_some()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: APPLICATIONS_TABLE.to_string(),
            timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("table", &self.table)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingStoreKey,
    InvalidStoreTimeout,
    HttpClient(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingStoreKey => {
                write!(f, "SUPABASE_ANON_KEY is required when SUPABASE_URL is set")
            }
            ConfigError::InvalidStoreTimeout => {
                write!(f, "APP_STORE_TIMEOUT_SECS must be a positive number of seconds")
            }
            ConfigError::HttpClient(reason) => {
                write!(f, "unable to build store http client: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::MissingStoreKey
            | ConfigError::InvalidStoreTimeout
            | ConfigError::HttpClient(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("SUPABASE_URL");
        env::remove_var("SUPABASE_ANON_KEY");
        env::remove_var("APP_APPLICATIONS_TABLE");
        env::remove_var("APP_STORE_TIMEOUT_SECS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.store.is_hosted());
        assert_eq!(config.store.table, "applications");
        assert_eq!(config.store.timeout, Duration::from_secs(10));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn hosted_store_requires_key() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SUPABASE_URL", "https://example.supabase.co");
        let result = AppConfig::load();
        reset_env();
        assert!(matches!(result, Err(ConfigError::MissingStoreKey)));
    }

    #[test]
    fn hosted_store_reads_table_and_timeout_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SUPABASE_URL", "https://example.supabase.co");
        env::set_var("SUPABASE_ANON_KEY", "anon-key");
        env::set_var("APP_APPLICATIONS_TABLE", "applications_staging");
        env::set_var("APP_STORE_TIMEOUT_SECS", "3");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert!(config.store.is_hosted());
        assert_eq!(config.store.table, "applications_staging");
        assert_eq!(config.store.timeout, Duration::from_secs(3));
        assert!(!format!("{:?}", config.store).contains("anon-key"));
    }

    #[test]
    fn rejects_zero_store_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_STORE_TIMEOUT_SECS", "0");
        let result = AppConfig::load();
        reset_env();
        assert!(matches!(result, Err(ConfigError::InvalidStoreTimeout)));
    }
}
