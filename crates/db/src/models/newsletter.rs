//! Newsletter subscription model and DTO.

use realtrust_core::types::{DbId, Timestamp};
use realtrust_core::validation::EMAIL_RE;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `newsletter_subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a subscription.
#[derive(Debug, Clone, Validate)]
pub struct CreateSubscription {
    #[validate(regex(path = *EMAIL_RE, message = "Please enter a valid email"))]
    pub email: String,
}
