//! Route definitions for the `/clients` resource.

use axum::routing::get;
use axum::Router;
use realtrust_media::MediaProfile;

use crate::handlers::client;
use crate::handlers::form::upload_body_limit;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create      (multipart: name, description, designation, image)
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update      (multipart, all parts optional)
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(client::list).post(client::create))
        .route(
            "/{id}",
            get(client::get_by_id)
                .put(client::update)
                .delete(client::delete),
        )
        .layer(upload_body_limit(MediaProfile::Client))
}
