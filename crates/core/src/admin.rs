//! Admin login state machine.

use crate::error::StoreError;
use crate::types::{AdminState, Credentials};

/// Tracks whether the admin is logged in.
#[derive(Debug, Clone, Default)]
pub struct Admin {
    credentials: Credentials,
    state: AdminState,
}

impl Admin {
    /// A logged-out admin guarded by `credentials`.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            state: AdminState::LoggedOut,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AdminState {
        self.state
    }

    /// Whether admin operations are allowed.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.state.is_logged_in()
    }

    /// Log in on an exact username and password match.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCredentials`] on mismatch; the state is
    /// left as it was.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), StoreError> {
        if !self.credentials.matches(username, password) {
            tracing::warn!(username, "Admin login rejected");
            return Err(StoreError::InvalidCredentials);
        }
        self.state = AdminState::LoggedIn;
        tracing::info!(username, "Admin logged in");
        Ok(())
    }

    /// Log out. Returns whether the admin was logged in.
    pub fn logout(&mut self) -> bool {
        let was_logged_in = self.is_logged_in();
        self.state = AdminState::LoggedOut;
        if was_logged_in {
            tracing::info!("Admin logged out");
        }
        was_logged_in
    }

    /// Gate for admin-only operations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unauthorized`] while logged out.
    pub const fn require_logged_in(&self) -> Result<(), StoreError> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(StoreError::Unauthorized)
        }
    }
}
