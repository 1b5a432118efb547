//! Status enums.

use serde::{Deserialize, Serialize};

/// Admin session state.
///
/// `LoggedOut -> LoggedIn` on an exact credential match, `LoggedIn ->
/// LoggedOut` on explicit logout. There are no other transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdminState {
    #[default]
    LoggedOut,
    LoggedIn,
}

impl AdminState {
    /// Whether admin operations are currently permitted.
    #[must_use]
    pub const fn is_logged_in(self) -> bool {
        matches!(self, Self::LoggedIn)
    }
}

impl std::fmt::Display for AdminState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoggedOut => write!(f, "logged_out"),
            Self::LoggedIn => write!(f, "logged_in"),
        }
    }
}
