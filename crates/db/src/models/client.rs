//! Client (testimonial) record model and DTOs.

use realtrust_core::types::{DbId, ImageRef, Timestamp};
use realtrust_core::validation::not_blank;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub designation: String,
    #[sqlx(rename = "image_url")]
    pub image: String,
    pub image_public_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Client {
    pub fn image_ref(&self) -> ImageRef {
        ImageRef {
            url: self.image.clone(),
            public_id: self.image_public_id.clone(),
        }
    }
}

/// DTO for inserting a client. The image is mandatory.
#[derive(Debug, Clone, Validate)]
pub struct CreateClient {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
    #[validate(custom(function = "not_blank", message = "Designation is required"))]
    pub designation: String,
    pub image: ImageRef,
}

/// DTO for updating a client. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateClient {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: Option<String>,
    #[validate(custom(function = "not_blank", message = "Designation is required"))]
    pub designation: Option<String>,
    pub image: Option<ImageRef>,
}
