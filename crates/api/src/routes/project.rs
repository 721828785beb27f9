//! Route definitions for the `/projects` resource.

use axum::routing::get;
use axum::Router;
use realtrust_media::MediaProfile;

use crate::handlers::form::upload_body_limit;
use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create      (multipart: name, description, image)
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update      (multipart, all parts optional)
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .layer(upload_body_limit(MediaProfile::Project))
}
