//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check (in lib.rs)
//!
//! # Books
//! GET  /                           - All books
//! GET  /search?q=                  - Search results
//!
//! # Cart
//! GET  /cart                       - Cart page with add-to-cart form
//! POST /cart/add                   - Add (book_id, quantity)
//! POST /cart/remove                - Remove (book_id)
//!
//! # Checkout
//! GET  /checkout                   - Order summary and customer form
//! POST /checkout                   - Confirm purchase, renders receipt
//!
//! # Admin
//! GET  /admin/login                - Login form
//! POST /admin/login                - Login action
//! POST /admin/logout               - Logout action
//! GET  /admin                      - Inventory (requires admin)
//! GET  /admin/books/new            - Add-book form
//! POST /admin/books                - Add book
//! GET  /admin/books/{id}/edit      - Edit form
//! POST /admin/books/{id}           - Update book
//! GET  /admin/books/{id}/remove    - Delete confirmation
//! POST /admin/books/{id}/remove    - Delete book
//! GET  /admin/sales                - Sales history and summary
//! ```

pub mod admin;
pub mod books;
pub mod cart;
pub mod checkout;
pub mod page;

use axum::{
    Router,
    routing::{get, post},
};
use bookstore_core::{Command, Outcome, StoreError};
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::set_flash;
use crate::models::Flash;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Books
        .route("/", get(books::index))
        .route("/search", get(books::search))
        // Cart
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::submit))
        // Admin panel
        .nest("/admin", admin::routes())
}

/// Run a command against the store and leave its result as a flash message.
///
/// Input that failed validation arrives as `Err` and is reported the same
/// way as a rejected command. Returns the outcome on success.
pub(crate) async fn run_command(
    state: &AppState,
    session: &Session,
    command: std::result::Result<Command, StoreError>,
) -> Result<Option<Outcome>> {
    let result = match command {
        Ok(command) => state.store().lock().await.execute(command),
        Err(err) => Err(err),
    };

    match result {
        Ok(outcome) => {
            set_flash(session, Flash::success(outcome.message())).await?;
            Ok(Some(outcome))
        }
        Err(err) => {
            tracing::info!(kind = err.kind(), "{err}");
            set_flash(session, Flash::error(err.to_string())).await?;
            Ok(None)
        }
    }
}
