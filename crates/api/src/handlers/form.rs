//! Multipart form reading for the image-bearing resources.

use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::StatusCode;
use realtrust_core::error::CoreError;
use realtrust_core::validation::require_non_empty;
use realtrust_media::{MediaError, MediaProfile};

use crate::error::{AppError, AppResult};

/// Name of the multipart part carrying the image file.
pub const IMAGE_FIELD: &str = "image";

/// Allowance for the text parts and multipart framing on top of the image.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Request body cap for routes accepting a `profile` upload.
pub fn upload_body_limit(profile: MediaProfile) -> DefaultBodyLimit {
    DefaultBodyLimit::max(profile.max_bytes() + FORM_OVERHEAD_BYTES)
}

/// An uploaded file.
#[derive(Debug)]
pub struct Upload {
    pub data: Vec<u8>,
    pub file_name: String,
}

/// Text parts plus an optional image file.
#[derive(Debug, Default)]
pub struct ImageForm {
    fields: HashMap<String, String>,
    pub image: Option<Upload>,
}

impl ImageForm {
    /// Drain `multipart`, stopping early once the image exceeds the profile
    /// cap. A zero-byte image part counts as no image.
    pub async fn read(multipart: &mut Multipart, profile: MediaProfile) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| upload_error(e, profile))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or("upload").to_owned();
                let mut data = Vec::new();
                while let Some(chunk) = field.chunk().await.map_err(|e| upload_error(e, profile))? {
                    data.extend_from_slice(&chunk);
                    if data.len() > profile.max_bytes() {
                        return Err(too_large(profile, data.len()));
                    }
                }
                if !data.is_empty() {
                    form.image = Some(Upload { data, file_name });
                }
            } else {
                let value = field.text().await.map_err(|e| upload_error(e, profile))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Remove and return a text part.
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Remove and return a text part that must be present and non-blank.
    pub fn required_text(&mut self, name: &str, label: &str) -> Result<String, CoreError> {
        let value = self.take_text(name);
        require_non_empty(label, value.as_deref())?;
        Ok(value.unwrap_or_default())
    }
}

fn too_large(profile: MediaProfile, size_bytes: usize) -> AppError {
    AppError::Media(MediaError::PayloadTooLarge {
        profile,
        limit_mib: profile.max_mib(),
        size_bytes,
    })
}

fn upload_error(err: MultipartError, profile: MediaProfile) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(profile, profile.max_bytes() + FORM_OVERHEAD_BYTES)
    } else {
        err.into()
    }
}
