//! Raster format sniffing.
//!
//! The format is read from the leading magic bytes; file names and declared
//! content types from the client are not trusted.

use image::ImageFormat;

use crate::error::MediaError;

/// Formats the host is allowed to ingest.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP];

/// Allow-list in the host's `allowed_formats` parameter syntax.
pub const ALLOWED_FORMAT_NAMES: &str = "jpg,jpeg,png,webp";

/// Detect the image format of `data`, rejecting anything off the allow-list.
pub fn sniff_format(data: &[u8]) -> Result<ImageFormat, MediaError> {
    if data.is_empty() {
        return Err(MediaError::UnsupportedFormat("empty upload".into()));
    }

    let format = image::guess_format(data)
        .map_err(|_| MediaError::UnsupportedFormat("unrecognised data".into()))?;

    if ALLOWED_FORMATS.contains(&format) {
        Ok(format)
    } else {
        Err(MediaError::UnsupportedFormat(format!("{format:?}").to_lowercase()))
    }
}
