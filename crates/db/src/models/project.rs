//! Project record model and DTOs.

use realtrust_core::types::{DbId, ImageRef, Timestamp};
use realtrust_core::validation::not_blank;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub name: String,
    pub description: String,
    /// Public URL of the hosted image.
    #[sqlx(rename = "image_url")]
    pub image: Option<String>,
    /// Media host handle used to delete the image.
    pub image_public_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The stored image, if both halves of the pair are present.
    pub fn image_ref(&self) -> Option<ImageRef> {
        match (&self.image, &self.image_public_id) {
            (Some(url), Some(public_id)) => Some(ImageRef {
                url: url.clone(),
                public_id: public_id.clone(),
            }),
            _ => None,
        }
    }
}

/// DTO for inserting a project.
#[derive(Debug, Clone, Validate)]
pub struct CreateProject {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
    pub image: Option<ImageRef>,
}

/// DTO for updating a project. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateProject {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: Option<String>,
    pub image: Option<ImageRef>,
}
