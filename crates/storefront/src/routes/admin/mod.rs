//! Admin panel: login, inventory management and sales history.
//!
//! Everything except the login form sits behind [`RequireAdmin`].
//!
//! [`RequireAdmin`]: crate::middleware::RequireAdmin

pub mod auth;
pub mod books;
pub mod sales;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the admin router (nested under `/admin`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(books::dashboard))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/books", post(books::create))
        .route("/books/new", get(books::new_form))
        .route("/books/{id}", post(books::update))
        .route("/books/{id}/edit", get(books::edit_form))
        .route(
            "/books/{id}/remove",
            get(books::confirm_remove).post(books::remove),
        )
        .route("/sales", get(sales::index))
}
