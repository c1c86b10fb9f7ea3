//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `THREADS_HOST` - Bind address (default: 127.0.0.1)
//! - `THREADS_PORT` - Listen port (default: 8501)
//! - `THREADS_BASE_URL` - Public URL of the site (default: `http://localhost:8501`)
//! - `THREADS_USERS_CSV` - Path of the user table (default: users.csv)
//! - `THREADS_IMAGES_CSV` - Path of the image catalog (default: images.csv)
//! - `THREADS_SIGNUP_DELAY_SECS` - Seconds the signup success page stays up (default: 2)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL; `https://` turns on secure session cookies
    pub base_url: String,
    /// Path of `users.csv`
    pub users_csv: PathBuf,
    /// Path of `images.csv`
    pub images_csv: PathBuf,
    /// How long the signup success page is shown before returning to the front page
    pub signup_delay: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8501,
            base_url: "http://localhost:8501".to_string(),
            users_csv: PathBuf::from("users.csv"),
            images_csv: PathBuf::from("images.csv"),
            signup_delay: Duration::from_secs(2),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            host: parse_or(&lookup, "THREADS_HOST", defaults.host)?,
            port: parse_or(&lookup, "THREADS_PORT", defaults.port)?,
            base_url: lookup("THREADS_BASE_URL").unwrap_or(defaults.base_url),
            users_csv: lookup("THREADS_USERS_CSV").map_or(defaults.users_csv, PathBuf::from),
            images_csv: lookup("THREADS_IMAGES_CSV").map_or(defaults.images_csv, PathBuf::from),
            signup_delay: Duration::from_secs(parse_or(
                &lookup,
                "THREADS_SIGNUP_DELAY_SECS",
                defaults.signup_delay.as_secs(),
            )?),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_rate(&lookup, "SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?,
            sentry_traces_sample_rate: parse_rate(
                &lookup,
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.sentry_traces_sample_rate,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a sample rate and check it lies in 0.0-1.0.
fn parse_rate(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let rate = parse_or(lookup, key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<WebConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        WebConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8501);
        assert_eq!(config.users_csv, PathBuf::from("users.csv"));
        assert_eq!(config.images_csv, PathBuf::from("images.csv"));
        assert_eq!(config.signup_delay, Duration::from_secs(2));
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("THREADS_HOST", "0.0.0.0"),
            ("THREADS_PORT", "9000"),
            ("THREADS_BASE_URL", "https://threads.example.com"),
            ("THREADS_USERS_CSV", "/data/users.csv"),
            ("THREADS_SIGNUP_DELAY_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(config.users_csv, PathBuf::from("/data/users.csv"));
        assert_eq!(config.signup_delay, Duration::from_secs(5));
        assert!(config.is_secure());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("THREADS_PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("THREADS_PORT"));
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        assert!(load(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
        assert!(load(&[("SENTRY_TRACES_SAMPLE_RATE", "0.25")]).is_ok());
    }

    #[test]
    fn test_empty_dsn_is_unset() {
        let config = load(&[("SENTRY_DSN", "")]).unwrap();
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = WebConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8501);
    }
}
