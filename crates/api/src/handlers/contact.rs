//! Handlers for the `/contacts` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use realtrust_core::error::CoreError;
use realtrust_db::models::contact::{Contact, CreateContact};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::RecordId;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Contact form as posted by the site. Every field is optional here so a
/// missing one yields "All fields are required" rather than a parse error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub city: Option<String>,
}

impl ContactForm {
    fn into_input(self) -> Result<CreateContact, CoreError> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        match (
            present(self.full_name),
            present(self.email),
            present(self.mobile),
            present(self.city),
        ) {
            (Some(full_name), Some(email), Some(mobile), Some(city)) => Ok(CreateContact {
                full_name,
                email,
                mobile,
                city,
            }),
            _ => Err(CoreError::Validation("All fields are required".into())),
        }
    }
}

/// GET /api/contacts
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Contact>>> {
    let contacts = state.store.list_contacts().await?;
    Ok(Json(contacts))
}

/// POST /api/contacts
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageResponse<Contact>>)> {
    let Json(form) = payload?;
    let input = form.into_input()?;

    let contact = state.store.create_contact(&input).await?;
    tracing::info!(contact_id = %contact.id, "Contact submission stored");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_data(
            "Contact form submitted successfully",
            contact,
        )),
    ))
}

/// DELETE /api/contacts/{id}
pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<MessageResponse>> {
    if !state.store.delete_contact(id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Contact",
            id,
        }));
    }
    tracing::info!(contact_id = %id, "Contact deleted");
    Ok(Json(MessageResponse::new("Contact deleted successfully")))
}
