//! Types the storefront keeps in the HTTP session.

pub mod session;

pub use session::{Flash, FlashKind, keys as session_keys};
