use async_trait::async_trait;
use realtrust_core::types::ImageRef;

use crate::error::MediaError;
use crate::profile::MediaProfile;

/// An external image host.
///
/// Implementations perform exactly one network call per method; the
/// delegate has already checked size and format before `upload` is called.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Store `data` under `profile`, returning the public URL and the handle
    /// needed to delete it.
    async fn upload(
        &self,
        profile: MediaProfile,
        data: Vec<u8>,
        file_name: &str,
    ) -> Result<ImageRef, MediaError>;

    /// Delete the object identified by `public_id`.
    ///
    /// Returns [`MediaError::NotFoundRemote`] if the host has no such object.
    async fn destroy(&self, public_id: &str) -> Result<(), MediaError>;
}
