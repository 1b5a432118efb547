//! Admin login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use bookstore_core::Command;
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::take_flash;
use crate::routes::page::PageContext;
use crate::routes::run_command;
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
}

/// Render the login page, or go straight to the panel if already logged in.
///
/// GET /admin/login
#[instrument(skip(state, session))]
pub async fn login_page(State(state): State<AppState>, session: Session) -> Response {
    let flash = take_flash(&session).await;
    let store = state.store().lock().await;
    if store.is_admin() {
        return Redirect::to("/admin").into_response();
    }
    LoginTemplate {
        page: PageContext::new(&store, flash),
    }
    .into_response()
}

/// Check credentials.
///
/// POST /admin/login
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let command = Command::AdminLogin {
        username: form.username,
        password: SecretString::from(form.password),
    };

    if run_command(&state, &session, Ok(command)).await?.is_some() {
        add_breadcrumb("auth", "Admin logged in", None);
        Ok(Redirect::to("/admin"))
    } else {
        Ok(Redirect::to("/admin/login"))
    }
}

/// Log out.
///
/// POST /admin/logout
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    run_command(&state, &session, Ok(Command::AdminLogout)).await?;
    add_breadcrumb("auth", "Admin logged out", None);
    Ok(Redirect::to("/"))
}
