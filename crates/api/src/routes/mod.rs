pub mod client;
pub mod contact;
pub mod health;
pub mod newsletter;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                  liveness (GET)
///
/// /projects                list, create (multipart)
/// /projects/{id}           get, update (multipart), delete
///
/// /clients                 list, create (multipart)
/// /clients/{id}            get, update (multipart), delete
///
/// /contacts                list, submit (JSON)
/// /contacts/{id}           delete
///
/// /newsletter              list, subscribe (JSON)
/// /newsletter/{id}         delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/clients", client::router())
        .nest("/contacts", contact::router())
        .nest("/newsletter", newsletter::router())
}
