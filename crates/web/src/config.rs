//! Web front end configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `COMPLAINTDESK_HOST` - Bind address (default: 127.0.0.1)
//! - `COMPLAINTDESK_PORT` - Listen port (default: 3000)
//! - `COMPLAINTDESK_BASE_URL` - Public URL (default: `http://localhost:3000`)
//! - `COMPLAINTDESK_API_URL` - Backend REST API base (default: `http://localhost:5000/api`)
//! - `COMPLAINTDESK_API_TIMEOUT_SECS` - Backend request timeout (default: 30)
//! - `COMPLAINTDESK_SESSION_HOURS` - Session inactivity expiry (default: 24)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Web front end configuration.
#[derive(Clone)]
pub struct WebConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of this server
    pub base_url: String,
    /// Backend REST API base URL, without trailing slash
    pub api_url: String,
    /// Timeout applied to every backend request
    pub api_timeout: Duration,
    /// Session inactivity expiry
    pub session_expiry: Duration,
    /// Sentry DSN for error tracking (contains a key)
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Log output format
    pub log_format: LogFormat,
}

impl std::fmt::Debug for WebConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("api_url", &self.api_url)
            .field("api_timeout", &self.api_timeout)
            .field("session_expiry", &self.session_expiry)
            .field(
                "sentry_dsn",
                &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sentry_environment", &self.sentry_environment)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("COMPLAINTDESK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("COMPLAINTDESK_HOST".to_string(), e.to_string())
            })?;
        let port = parse_env("COMPLAINTDESK_PORT", "3000")?;
        let base_url = get_url("COMPLAINTDESK_BASE_URL", "http://localhost:3000")?;
        let api_url = get_url("COMPLAINTDESK_API_URL", "http://localhost:5000/api")?;
        let api_timeout = Duration::from_secs(parse_env("COMPLAINTDESK_API_TIMEOUT_SECS", "30")?);
        let session_hours: u64 = parse_env("COMPLAINTDESK_SESSION_HOURS", "24")?;

        Ok(Self {
            host,
            port,
            base_url,
            api_url,
            api_timeout,
            session_expiry: Duration::from_secs(session_hours * 60 * 60),
            sentry_dsn: get_optional_env("SENTRY_DSN").map(SecretString::from),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            log_format: log_format(get_optional_env("LOG_FORMAT").as_deref()),
        })
    }

    /// Configuration pointing at a given backend, with defaults elsewhere.
    #[must_use]
    pub fn for_api(api_url: &str) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_timeout: Duration::from_secs(30),
            session_expiry: Duration::from_secs(24 * 60 * 60),
            sentry_dsn: None,
            sentry_environment: None,
            log_format: LogFormat::Text,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public URL is served over TLS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// The Sentry DSN, exposed for client initialization.
    #[must_use]
    pub fn sentry_dsn(&self) -> Option<&str> {
        self.sentry_dsn.as_ref().map(ExposeSecret::expose_secret)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable; blank counts as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Get an http(s) URL, without trailing slash.
fn get_url(key: &str, default: &str) -> Result<String, ConfigError> {
    let raw = get_env_or_default(key, default);
    validate_url(&raw).map_err(|msg| ConfigError::InvalidEnvVar(key.to_string(), msg))
}

fn validate_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn log_format(raw: Option<&str>) -> LogFormat {
    match raw {
        Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Text,
    }
}
