//! Sales history and summary.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use bookstore_core::{CurrencyCode, Sale};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{RequireAdmin, set_flash, take_flash};
use crate::models::Flash;
use crate::routes::page::PageContext;
use crate::state::AppState;

/// Timestamp format in the sales table.
const SALE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One purchased book in a sale.
#[derive(Debug, Clone)]
pub struct SaleItemRow {
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub subtotal: String,
}

/// Sale display data.
#[derive(Debug, Clone)]
pub struct SaleRow {
    pub id: i32,
    pub date: String,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<SaleItemRow>,
    pub total: String,
}

impl SaleRow {
    fn new(sale: &Sale, currency: CurrencyCode) -> Self {
        Self {
            id: sale.id.as_i32(),
            date: sale.date.format(SALE_DATE_FORMAT).to_string(),
            customer_name: sale.customer.name.clone(),
            customer_email: sale.customer.email.to_string(),
            items: sale
                .items
                .iter()
                .map(|item| SaleItemRow {
                    title: item.title.clone(),
                    quantity: item.quantity,
                    price: item.price.display(currency),
                    subtotal: item.subtotal().display(currency),
                })
                .collect(),
            total: sale.total.display(currency),
        }
    }
}

/// Sales page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/sales.html")]
pub struct SalesTemplate {
    pub page: PageContext,
    pub sales: Vec<SaleRow>,
    pub sale_count: usize,
    pub books_sold: u64,
    pub revenue: String,
}

/// Sales history with totals.
///
/// GET /admin/sales
#[instrument(skip_all)]
pub async fn index(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<Response> {
    let flash = take_flash(&session).await;
    let currency = state.config().currency;
    let store = state.store().lock().await;

    let report = match store.sales_report() {
        Ok(report) => report,
        Err(err) => {
            drop(store);
            set_flash(&session, Flash::error(err.to_string())).await?;
            return Ok(Redirect::to("/admin/login").into_response());
        }
    };

    Ok(SalesTemplate {
        page: PageContext::new(&store, flash),
        sales: report
            .sales
            .iter()
            .map(|sale| SaleRow::new(sale, currency))
            .collect(),
        sale_count: report.sale_count,
        books_sold: report.books_sold,
        revenue: report.revenue.display(currency),
    }
    .into_response())
}
