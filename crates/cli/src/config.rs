//! CLI configuration loaded from environment variables.
//!
//! Reads the same admin and currency variables as the storefront:
//! - `BOOKSTORE_ADMIN_USERNAME` - Admin username (default: admin)
//! - `BOOKSTORE_ADMIN_PASSWORD` - Admin password (default: 1234)
//! - `BOOKSTORE_CURRENCY` - Display currency code (default: INR)

use bookstore_core::{
    Credentials, CurrencyCode, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME,
};
use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// CLI configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub admin: Credentials,
    pub currency: CurrencyCode,
}

impl CliConfig {
    /// Load from the process environment, reading `.env` first if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but blank or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but blank or invalid.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let currency = match lookup("BOOKSTORE_CURRENCY") {
            Some(code) => code
                .parse::<CurrencyCode>()
                .map_err(|e| ConfigError::InvalidEnvVar("BOOKSTORE_CURRENCY", e))?,
            None => CurrencyCode::default(),
        };
        let username = non_blank(&lookup, "BOOKSTORE_ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME)?;
        let password = non_blank(&lookup, "BOOKSTORE_ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD)?;

        Ok(Self {
            admin: Credentials::new(username, SecretString::from(password)),
            currency,
        })
    }
}

fn non_blank(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        None => Ok(default.to_owned()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::MissingEnvVar(key)),
        Some(value) => Ok(value),
    }
}
