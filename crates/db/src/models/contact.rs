//! Contact form submission model and DTO.

use realtrust_core::types::{DbId, Timestamp};
use realtrust_core::validation::{not_blank, EMAIL_RE, MOBILE_RE};
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub city: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a contact submission.
#[derive(Debug, Clone, Validate)]
pub struct CreateContact {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub full_name: String,
    #[validate(regex(path = *EMAIL_RE, message = "Please enter a valid email"))]
    pub email: String,
    #[validate(regex(path = *MOBILE_RE, message = "Please enter a valid mobile number"))]
    pub mobile: String,
    #[validate(custom(function = "not_blank", message = "City is required"))]
    pub city: String,
}
