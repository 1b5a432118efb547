//! Core value types for the bookstore.
//!
//! Type-safe wrappers for IDs, prices, emails, credentials and statuses.

pub mod credential;
pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use credential::{Credentials, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use status::*;
