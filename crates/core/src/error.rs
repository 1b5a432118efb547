//! Store error types.
//!
//! Every variant is recoverable: callers show the message to the user and the
//! session carries on.

use thiserror::Error;

use crate::types::{BookId, EmailError, PriceError};

/// Errors returned by catalog, cart, checkout and admin operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No book with this id exists in the catalog.
    #[error("Book {0} not found")]
    NotFound(BookId),

    /// The book is not in the cart.
    #[error("Book {0} is not in your cart")]
    NotInCart(BookId),

    /// The requested quantity exceeds the available stock.
    #[error("Only {available} of '{title}' in stock ({requested} requested)")]
    OutOfStock {
        book_id: BookId,
        title: String,
        requested: u32,
        available: u32,
    },

    /// Admin login attempt did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A quantity of zero was requested.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    /// Checkout was attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// An admin operation was attempted while logged out.
    #[error("Admin login required")]
    Unauthorized,

    /// User input failed validation before dispatch.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl StoreError {
    /// Short machine-readable name, used as a tracing field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) | Self::NotInCart(_) => "not_found",
            Self::OutOfStock { .. } => "out_of_stock",
            Self::InvalidCredentials => "invalid_credentials",
            Self::InvalidQuantity | Self::Invalid(_) => "invalid_input",
            Self::EmptyCart => "empty_cart",
            Self::Unauthorized => "unauthorized",
        }
    }
}

/// Raw user input that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was blank.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A field that must be a whole number was not.
    #[error("{field} must be a whole number (got '{value}')")]
    NotANumber { field: &'static str, value: String },

    /// A price field was not a valid non-negative amount.
    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),

    /// The email field was malformed.
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        let err = StoreError::OutOfStock {
            book_id: BookId::new(2),
            title: "AI & ML".to_owned(),
            requested: 6,
            available: 5,
        };
        assert_eq!(err.to_string(), "Only 5 of 'AI & ML' in stock (6 requested)");
        assert_eq!(StoreError::NotFound(BookId::new(9)).to_string(), "Book 9 not found");
        assert_eq!(StoreError::InvalidCredentials.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err = StoreError::from(ValidationError::Required { field: "Title" });
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(err.kind(), "invalid_input");
    }
}
