use crate::profile::MediaProfile;

/// Errors raised by the media delegate and its hosts.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The upload exceeds the profile's size cap.
    #[error("Image exceeds the {limit_mib} MiB limit for {profile} uploads")]
    PayloadTooLarge {
        profile: MediaProfile,
        limit_mib: usize,
        size_bytes: usize,
    },

    /// The bytes are not one of the allow-listed raster formats.
    #[error("Unsupported image format: {0}. Allowed: jpg, jpeg, png, webp")]
    UnsupportedFormat(String),

    /// The host has no object for the given handle.
    #[error("Media object not found: {0}")]
    NotFoundRemote(String),

    /// The HTTP request to the host failed (network, DNS, timeout, etc.).
    #[error("Media host request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The host answered with a non-2xx status.
    #[error("Media host returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// The host answered 2xx with a body we could not interpret.
    #[error("Unexpected media host response: {0}")]
    InvalidResponse(String),
}
