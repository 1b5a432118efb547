//! Cart route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use bookstore_core::{Command, StoreError, parse_book_id, parse_quantity};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::take_flash;
use crate::routes::page::{BookRow, CartDisplay, PageContext};
use crate::routes::run_command;
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub book_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: String,
}

fn default_quantity() -> String {
    "1".to_string()
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub book_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: PageContext,
    pub cart: CartDisplay,
    /// Books offered in the add-to-cart form.
    pub books: Vec<BookRow>,
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let flash = take_flash(&session).await;
    let currency = state.config().currency;
    let store = state.store().lock().await;

    CartShowTemplate {
        page: PageContext::new(&store, flash),
        cart: CartDisplay::new(&store.view_cart(), currency),
        books: store
            .catalog()
            .list()
            .into_iter()
            .map(|book| BookRow::new(book, currency))
            .collect(),
    }
}

/// Add item to cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let command = parse_book_id(&form.book_id)
        .and_then(|book_id| {
            Ok(Command::AddToCart {
                book_id,
                quantity: parse_quantity(&form.quantity)?,
            })
        })
        .map_err(StoreError::from);

    if run_command(&state, &session, command).await?.is_some() {
        add_breadcrumb("cart", "Added to cart", Some(&[("book_id", form.book_id.as_str())]));
    }
    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let command = parse_book_id(&form.book_id)
        .map(|book_id| Command::RemoveFromCart { book_id })
        .map_err(StoreError::from);

    run_command(&state, &session, command).await?;
    Ok(Redirect::to("/cart"))
}
