//! Media delegate: pushes uploaded images to an external host and deletes
//! them again when the owning record goes away.
//!
//! [`MediaDelegate`] enforces the per-profile size cap and the raster format
//! allow-list, then hands the bytes to a [`MediaHost`]. The production host is
//! [`cloudinary::CloudinaryHost`], built explicitly from credentials at
//! startup and passed in; nothing here reads ambient global configuration.

pub mod cloudinary;
pub mod delegate;
pub mod error;
pub mod format;
pub mod host;
pub mod profile;

pub use delegate::MediaDelegate;
pub use error::MediaError;
pub use host::MediaHost;
pub use profile::MediaProfile;
