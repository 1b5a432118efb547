//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `BOOKSTORE_HOST` - Bind address (default: 127.0.0.1)
//! - `BOOKSTORE_PORT` - Listen port (default: 3000)
//! - `BOOKSTORE_BASE_URL` - Public URL; `https://` enables secure cookies
//!   (default: <http://localhost:3000>)
//! - `BOOKSTORE_ADMIN_USERNAME` - Admin username (default: admin)
//! - `BOOKSTORE_ADMIN_PASSWORD` - Admin password (default: 1234)
//! - `BOOKSTORE_CURRENCY` - Display currency code (default: INR)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use bookstore_core::{
    Credentials, CurrencyCode, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME,
};
use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Admin login pair
    pub admin: Credentials,
    /// Currency used when rendering prices
    pub currency: CurrencyCode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            admin: Credentials::default(),
            currency: CurrencyCode::default(),
            sentry_dsn: None,
        }
    }
}

impl StorefrontConfig {
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
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_env_or_default(&lookup, "BOOKSTORE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BOOKSTORE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default(&lookup, "BOOKSTORE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BOOKSTORE_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default(&lookup, "BOOKSTORE_BASE_URL", "http://localhost:3000");
        let currency = get_env_or_default(&lookup, "BOOKSTORE_CURRENCY", "INR")
            .parse::<CurrencyCode>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BOOKSTORE_CURRENCY".to_string(), e.to_string())
            })?;
        let admin = load_credentials(&lookup)?;
        let sentry_dsn = get_optional_env(&lookup, "SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            admin,
            currency,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Admin credentials from the environment. Blank values count as missing.
fn load_credentials(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Credentials, ConfigError> {
    let username = get_non_blank(lookup, "BOOKSTORE_ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME)?;
    let password = get_non_blank(lookup, "BOOKSTORE_ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD)?;
    Ok(Credentials::new(username, SecretString::from(password)))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values are treated as unset.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Like [`get_env_or_default`], but a variable that is set to whitespace is
/// an error rather than silently falling back.
fn get_non_blank(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::MissingEnvVar(key.to_string())),
        Some(value) => Ok(value),
    }
}
