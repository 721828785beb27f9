/// Record ids are time-ordered UUIDv7 values assigned by the server.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh record id.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}

/// A hosted image as returned by the media delegate: the public URL plus the
/// handle needed to delete it later.
///
/// Records that carry an image always store both halves together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub url: String,
    pub public_id: String,
}
