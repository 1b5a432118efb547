//! Checkout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bookstore_core::{CheckoutDraft, Command, Outcome, StoreError};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{set_flash, take_flash};
use crate::models::Flash;
use crate::routes::page::{CartDisplay, PageContext, ReceiptDisplay};
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub page: PageContext,
    pub cart: CartDisplay,
    pub form: CheckoutDraft,
    pub error: Option<String>,
}

/// Receipt page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/receipt.html")]
pub struct ReceiptTemplate {
    pub page: PageContext,
    pub receipt: ReceiptDisplay,
}

/// Display order summary and customer form.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let flash = take_flash(&session).await;
    let currency = state.config().currency;
    let store = state.store().lock().await;

    CheckoutTemplate {
        page: PageContext::new(&store, flash),
        cart: CartDisplay::new(&store.view_cart(), currency),
        form: CheckoutDraft::default(),
        error: None,
    }
}

/// Confirm purchase.
///
/// Renders the receipt on success. Invalid customer details re-render the
/// form; store errors (empty cart, stock changed) go back to the cart.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutDraft>,
) -> Result<Response> {
    let currency = state.config().currency;
    let mut store = state.store().lock().await;

    let customer = match form.validate() {
        Ok(customer) => customer,
        Err(err) => {
            let template = CheckoutTemplate {
                page: PageContext::new(&store, None),
                cart: CartDisplay::new(&store.view_cart(), currency),
                error: Some(err.to_string()),
                form,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    match store.execute(Command::Checkout { customer }) {
        Ok(outcome) => {
            let message = outcome.message();
            let Outcome::Receipt(receipt) = outcome else {
                return Err(crate::error::AppError::Internal(
                    "checkout returned no receipt".to_string(),
                ));
            };
            add_breadcrumb(
                "checkout",
                "Checkout completed",
                Some(&[("sale_id", receipt.sale_id.to_string().as_str())]),
            );
            Ok(ReceiptTemplate {
                page: PageContext::new(&store, Some(Flash::success(message))),
                receipt: ReceiptDisplay::new(&receipt, currency),
            }
            .into_response())
        }
        Err(err) => {
            drop(store);
            tracing::info!(kind = err.kind(), "Checkout rejected: {err}");
            set_flash(&session, Flash::error(err.to_string())).await?;
            let target = if matches!(err, StoreError::EmptyCart) {
                "/"
            } else {
                "/cart"
            };
            Ok(Redirect::to(target).into_response())
        }
    }
}
