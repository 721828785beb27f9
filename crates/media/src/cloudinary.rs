//! Cloudinary implementation of [`MediaHost`].
//!
//! Uses the signed upload and destroy endpoints of the image upload API.
//! Signatures are the SHA-256 hex digest of the alphabetically sorted
//! `key=value` parameters joined with `&`, followed by the API secret. The
//! account must be configured for SHA-256 signatures.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use realtrust_core::types::ImageRef;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::MediaError;
use crate::format::ALLOWED_FORMAT_NAMES;
use crate::host::MediaHost;
use crate::profile::MediaProfile;

/// Default API origin.
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Credentials and transport settings for [`CloudinaryHost`].
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Timeout for a single upload or destroy call.
    pub timeout: Duration,
    /// API origin, overridable for testing against a stub.
    pub api_base: String,
}

impl CloudinaryConfig {
    pub fn new(cloud_name: String, api_key: String, api_secret: String, timeout: Duration) -> Self {
        Self {
            cloud_name,
            api_key,
            api_secret,
            timeout,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Sign `params` with `secret`. `BTreeMap` iteration gives the required
/// alphabetical order.
pub fn sign(params: &BTreeMap<&str, String>, secret: &str) -> String {
    let to_sign = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let digest = Sha256::digest(format!("{to_sign}{secret}").as_bytes());
    format!("{digest:x}")
}

/// Parameters signed for an upload under `profile` at `timestamp`.
pub fn upload_params(profile: MediaProfile, timestamp: i64) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        ("allowed_formats", ALLOWED_FORMAT_NAMES.to_string()),
        ("folder", profile.folder().to_string()),
        ("timestamp", timestamp.to_string()),
        ("transformation", profile.transformation().to_string()),
    ])
}

// ---------------------------------------------------------------------------
// CloudinaryHost
// ---------------------------------------------------------------------------

/// Signed client for the Cloudinary image API.
pub struct CloudinaryHost {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryHost {
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{action}",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name
        )
    }

    /// Turn a non-2xx response into [`MediaError::Remote`], preferring the
    /// host's own error message when the body carries one.
    async fn remote_error(response: reqwest::Response) -> MediaError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        MediaError::Remote { status, message }
    }
}

#[async_trait]
impl MediaHost for CloudinaryHost {
    async fn upload(
        &self,
        profile: MediaProfile,
        data: Vec<u8>,
        file_name: &str,
    ) -> Result<ImageRef, MediaError> {
        let params = upload_params(profile, chrono::Utc::now().timestamp());
        let signature = sign(&params, &self.config.api_secret);

        let mut form = Form::new()
            .part("file", Part::bytes(data).file_name(file_name.to_string()))
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;
        Ok(ImageRef {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), MediaError> {
        let params = BTreeMap::from([
            ("public_id", public_id.to_string()),
            ("timestamp", chrono::Utc::now().timestamp().to_string()),
        ]);
        let signature = sign(&params, &self.config.api_secret);

        let mut form = params;
        form.insert("api_key", self.config.api_key.clone());
        form.insert("signature", signature);

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;
        match body.result.as_str() {
            "ok" => Ok(()),
            "not found" => Err(MediaError::NotFoundRemote(public_id.to_string())),
            other => Err(MediaError::InvalidResponse(format!(
                "destroy returned result '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
