use std::sync::Arc;

use realtrust_core::types::ImageRef;

use crate::error::MediaError;
use crate::format::sniff_format;
use crate::host::MediaHost;
use crate::profile::MediaProfile;

/// Front door for image storage used by the controllers.
///
/// Cheap to clone; the host sits behind an `Arc`.
#[derive(Clone)]
pub struct MediaDelegate {
    host: Arc<dyn MediaHost>,
}

impl MediaDelegate {
    pub fn new(host: Arc<dyn MediaHost>) -> Self {
        Self { host }
    }

    /// Check `data` against `profile` and upload it.
    ///
    /// Size is checked before format so an oversized file is never sniffed.
    pub async fn store(
        &self,
        profile: MediaProfile,
        data: Vec<u8>,
        file_name: &str,
    ) -> Result<ImageRef, MediaError> {
        if data.len() > profile.max_bytes() {
            return Err(MediaError::PayloadTooLarge {
                profile,
                limit_mib: profile.max_mib(),
                size_bytes: data.len(),
            });
        }
        let format = sniff_format(&data)?;

        tracing::debug!(
            %profile,
            file_name,
            size_bytes = data.len(),
            ?format,
            "Uploading image to media host"
        );
        let image = self.host.upload(profile, data, file_name).await?;
        tracing::info!(%profile, public_id = %image.public_id, "Image stored");
        Ok(image)
    }

    /// Delete a stored image by its handle.
    pub async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        self.host.destroy(public_id).await?;
        tracing::info!(public_id, "Image deleted from media host");
        Ok(())
    }
}
