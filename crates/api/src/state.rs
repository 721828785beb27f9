use std::sync::Arc;

use realtrust_db::store::RecordStore;
use realtrust_media::MediaDelegate;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Record store backend (PostgreSQL in production).
    pub store: Arc<dyn RecordStore>,
    /// Image upload/delete front door.
    pub media: MediaDelegate,
}
