//! Book listing and search handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use bookstore_core::{Book, Outcome};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::middleware::take_flash;
use crate::routes::page::{BookRow, PageContext};
use crate::state::AppState;

/// Search page query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// All-books page template.
#[derive(Template, WebTemplate)]
#[template(path = "books/index.html")]
pub struct BooksIndexTemplate {
    pub page: PageContext,
    pub books: Vec<BookRow>,
}

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "books/search.html")]
pub struct SearchTemplate {
    pub page: PageContext,
    pub query: String,
    pub books: Vec<BookRow>,
    /// Result summary; `None` before a term is entered.
    pub message: Option<String>,
}

/// Display all books.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let flash = take_flash(&session).await;
    let currency = state.config().currency;
    let store = state.store().lock().await;

    BooksIndexTemplate {
        page: PageContext::new(&store, flash),
        books: store
            .catalog()
            .list()
            .into_iter()
            .map(|book| BookRow::new(book, currency))
            .collect(),
    }
}

/// Search by title, author or description.
#[instrument(skip(state, session))]
pub async fn search(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let flash = take_flash(&session).await;
    let currency = state.config().currency;
    let term = query.q.trim().to_string();
    let store = state.store().lock().await;

    let (books, message) = if term.is_empty() {
        (Vec::new(), None)
    } else {
        let found: Vec<Book> = store.catalog().search(&term).into_iter().cloned().collect();
        let rows: Vec<BookRow> = found.iter().map(|book| BookRow::new(book, currency)).collect();
        let outcome = Outcome::Books {
            books: found,
            query: Some(term.clone()),
        };
        (rows, Some(outcome.message()))
    };

    tracing::debug!(term = %term, results = books.len(), "Search");

    SearchTemplate {
        page: PageContext::new(&store, flash),
        query: term,
        books,
        message,
    }
}
