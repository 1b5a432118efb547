//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors, binary only)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with in-memory store, carries flash messages)

pub mod auth;
pub mod session;

pub use auth::{AdminRejection, RequireAdmin};
pub use session::{create_session_layer, set_flash, take_flash};
