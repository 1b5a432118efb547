//! Admin credential types.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Default admin username when none is configured.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Default admin password when none is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "1234";

/// The single admin username/password pair for the store.
///
/// Comparison is an exact string match on both fields. `Debug` never prints
/// the password.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Create a credential pair.
    #[must_use]
    pub const fn new(username: String, password: SecretString) -> Self {
        Self { username, password }
    }

    /// The configured admin username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether the given pair matches exactly.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.expose_secret() == password
    }

    /// Whether these are the built-in demo credentials.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.matches(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(
            DEFAULT_ADMIN_USERNAME.to_owned(),
            SecretString::from(DEFAULT_ADMIN_PASSWORD),
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
