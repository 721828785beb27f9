use realtrust_core::error::CoreError;

/// Error returned by every [`RecordStore`](crate::store::RecordStore) method.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Validation, duplicate, or other domain failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The PostgreSQL backend failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
