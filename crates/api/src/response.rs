//! Shared response envelope types for API handlers.
//!
//! Mutating endpoints that do not return the bare record answer with a
//! `{ "message": ..., "data": ... }` envelope; use [`MessageResponse`] instead
//! of ad-hoc `serde_json::json!` bodies.

use serde::Serialize;

/// `{ "message": String, "data"?: T }` response envelope.
///
/// `data` is omitted entirely when `None`, so delete confirmations
/// serialize as `{ "message": "..." }`.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize = ()> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> MessageResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}
