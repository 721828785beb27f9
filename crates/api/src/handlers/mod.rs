//! Resource controllers, one module per record kind.

pub mod client;
pub mod contact;
pub mod form;
pub mod newsletter;
pub mod project;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use realtrust_core::types::DbId;
use realtrust_media::MediaDelegate;

use crate::error::AppError;

/// Record id taken from the `{id}` path segment.
///
/// Rejects with a JSON 400 when the segment is not a UUID, instead of the
/// plain-text rejection `Path<Uuid>` would produce.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub DbId);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        raw.parse::<DbId>()
            .map(RecordId)
            .map_err(|_| AppError::BadRequest(format!("Invalid id: {raw}")))
    }
}

/// Delete a hosted image without failing the request.
///
/// Used when the owning record is removed or replaced, and to undo an upload
/// whose record could not be persisted.
pub(crate) async fn release_image(media: &MediaDelegate, public_id: &str, reason: &'static str) {
    if let Err(err) = media.delete(public_id).await {
        tracing::warn!(public_id, reason, error = %err, "Best-effort image deletion failed");
    }
}
