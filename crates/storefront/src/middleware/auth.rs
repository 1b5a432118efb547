//! Admin gate for route handlers.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::Flash;
use crate::state::AppState;

use super::session::set_flash;

/// Extractor that requires the admin to be logged in.
///
/// If the admin is logged out, leaves a flash message and redirects to the
/// login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(_admin: RequireAdmin, State(state): State<AppState>) -> impl IntoResponse {
///     // only reached while logged in
/// }
/// ```
pub struct RequireAdmin;

/// Error returned when an admin page is requested while logged out.
pub struct AdminRejection;

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        Redirect::to("/admin/login").into_response()
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.store().lock().await.is_admin() {
            return Ok(Self);
        }

        tracing::debug!(path = %parts.uri.path(), "Admin page requested while logged out");
        if let Some(session) = parts.extensions.get::<Session>() {
            if let Err(e) = set_flash(session, Flash::error("Admin login required")).await {
                tracing::warn!("Failed to store flash message: {e}");
            }
        }
        Err(AdminRejection)
    }
}
