//! Inventory management: the admin dashboard and book add/edit/remove.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bookstore_core::{BookDraft, BookId, Command, StoreError};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{RequireAdmin, set_flash, take_flash};
use crate::models::Flash;
use crate::routes::page::{BookRow, PageContext};
use crate::routes::run_command;
use crate::state::AppState;

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub page: PageContext,
    pub books: Vec<BookRow>,
    pub sale_count: usize,
}

/// Add/edit book form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/book_form.html")]
pub struct BookFormTemplate {
    pub page: PageContext,
    pub heading: String,
    pub action: String,
    pub submit_label: &'static str,
    pub form: BookDraft,
    pub error: Option<String>,
}

/// Delete confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/remove.html")]
pub struct RemoveTemplate {
    pub page: PageContext,
    pub book: BookRow,
}

impl BookFormTemplate {
    fn for_new(page: PageContext, form: BookDraft, error: Option<String>) -> Self {
        Self {
            page,
            heading: "Add New Book".to_string(),
            action: "/admin/books".to_string(),
            submit_label: "Add Book",
            form,
            error,
        }
    }

    fn for_edit(page: PageContext, id: BookId, form: BookDraft, error: Option<String>) -> Self {
        Self {
            page,
            heading: format!("Edit Book #{id}"),
            action: format!("/admin/books/{id}"),
            submit_label: "Update Book",
            form,
            error,
        }
    }
}

/// Flash "Book not found" and go back to the dashboard.
async fn book_not_found(session: &Session, id: BookId) -> Result<Response> {
    set_flash(session, Flash::error(StoreError::NotFound(id).to_string())).await?;
    Ok(Redirect::to("/admin").into_response())
}

/// Inventory table.
///
/// GET /admin
#[instrument(skip_all)]
pub async fn dashboard(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let flash = take_flash(&session).await;
    let currency = state.config().currency;
    let store = state.store().lock().await;

    DashboardTemplate {
        page: PageContext::new(&store, flash),
        books: store
            .catalog()
            .list()
            .into_iter()
            .map(|book| BookRow::new(book, currency))
            .collect(),
        sale_count: store.sales().len(),
    }
}

/// Empty add-book form.
///
/// GET /admin/books/new
#[instrument(skip_all)]
pub async fn new_form(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let flash = take_flash(&session).await;
    let store = state.store().lock().await;
    let form = BookDraft {
        stock: "1".to_string(),
        price: "0".to_string(),
        ..BookDraft::default()
    };
    BookFormTemplate::for_new(PageContext::new(&store, flash), form, None)
}

/// Add a book.
///
/// POST /admin/books
#[instrument(skip_all)]
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<BookDraft>,
) -> Result<Response> {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(err) => {
            let store = state.store().lock().await;
            let template =
                BookFormTemplate::for_new(PageContext::new(&store, None), form, Some(err.to_string()));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    run_command(&state, &session, Ok(Command::AddBook(fields))).await?;
    Ok(Redirect::to("/admin").into_response())
}

/// Edit form pre-filled from the book.
///
/// GET /admin/books/{id}/edit
#[instrument(skip(_admin, state, session))]
pub async fn edit_form(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response> {
    let id = BookId::new(id);
    let flash = take_flash(&session).await;
    let store = state.store().lock().await;

    let Some(book) = store.catalog().find(id) else {
        drop(store);
        return book_not_found(&session, id).await;
    };
    let form = BookDraft::from_book(book);
    Ok(BookFormTemplate::for_edit(PageContext::new(&store, flash), id, form, None).into_response())
}

/// Update a book.
///
/// POST /admin/books/{id}
#[instrument(skip(_admin, state, session, form))]
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<BookDraft>,
) -> Result<Response> {
    let id = BookId::new(id);
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(err) => {
            let store = state.store().lock().await;
            let template = BookFormTemplate::for_edit(
                PageContext::new(&store, None),
                id,
                form,
                Some(err.to_string()),
            );
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    run_command(&state, &session, Ok(Command::UpdateBook { id, fields })).await?;
    Ok(Redirect::to("/admin").into_response())
}

/// Ask before deleting.
///
/// GET /admin/books/{id}/remove
#[instrument(skip(_admin, state, session))]
pub async fn confirm_remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response> {
    let id = BookId::new(id);
    let flash = take_flash(&session).await;
    let currency = state.config().currency;
    let store = state.store().lock().await;

    let Some(book) = store.catalog().find(id) else {
        drop(store);
        return book_not_found(&session, id).await;
    };
    let book = BookRow::new(book, currency);
    Ok(RemoveTemplate {
        page: PageContext::new(&store, flash),
        book,
    }
    .into_response())
}

/// Delete a book.
///
/// POST /admin/books/{id}/remove
#[instrument(skip(_admin, state, session))]
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    let id = BookId::new(id);
    run_command(&state, &session, Ok(Command::RemoveBook { id })).await?;
    Ok(Redirect::to("/admin"))
}
