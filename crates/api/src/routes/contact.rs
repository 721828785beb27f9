use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/contacts`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> submit   (JSON: fullName, email, mobile, city)
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list).post(contact::submit))
        .route("/{id}", delete(contact::delete))
}
