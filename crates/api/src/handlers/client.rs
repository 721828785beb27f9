//! Handlers for the `/clients` (testimonials) resource.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use realtrust_core::error::CoreError;
use realtrust_core::types::DbId;
use realtrust_core::validation::validate_input;
use realtrust_db::models::client::{Client, CreateClient, UpdateClient};
use realtrust_media::MediaProfile;

use crate::error::{AppError, AppResult};
use crate::handlers::form::ImageForm;
use crate::handlers::{release_image, RecordId};
use crate::response::MessageResponse;
use crate::state::AppState;

const PROFILE: MediaProfile = MediaProfile::Client;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Client",
        id,
    })
}

/// GET /api/clients
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Client>>> {
    let clients = state.store.list_clients().await?;
    Ok(Json(clients))
}

/// GET /api/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<Client>> {
    let client = state
        .store
        .find_client(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(client))
}

/// POST /api/clients
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let mut form = ImageForm::read(&mut multipart?, PROFILE).await?;

    let upload = form.image.take().ok_or(CoreError::MissingImage)?;
    let name = form.required_text("name", "Name")?;
    let description = form.required_text("description", "Description")?;
    let designation = form.required_text("designation", "Designation")?;

    let image = state
        .media
        .store(PROFILE, upload.data, &upload.file_name)
        .await?;
    let public_id = image.public_id.clone();

    let input = CreateClient {
        name,
        description,
        designation,
        image,
    };
    match state.store.create_client(&input).await {
        Ok(client) => {
            tracing::info!(client_id = %client.id, "Client created");
            Ok((StatusCode::CREATED, Json(client)))
        }
        Err(err) => {
            release_image(&state.media, &public_id, "client create failed").await;
            Err(err.into())
        }
    }
}

/// PUT /api/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Client>> {
    let mut form = ImageForm::read(&mut multipart?, PROFILE).await?;

    let mut input = UpdateClient {
        name: form.take_text("name"),
        description: form.take_text("description"),
        designation: form.take_text("designation"),
        image: None,
    };
    validate_input(&input)?;

    let existing = state
        .store
        .find_client(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(upload) = form.image.take() {
        input.image = Some(
            state
                .media
                .store(PROFILE, upload.data, &upload.file_name)
                .await?,
        );
    }

    let updated = match state.store.update_client(id, &input).await {
        Ok(Some(client)) => client,
        Ok(None) => {
            if let Some(image) = &input.image {
                release_image(&state.media, &image.public_id, "client vanished during update")
                    .await;
            }
            return Err(not_found(id));
        }
        Err(err) => {
            if let Some(image) = &input.image {
                release_image(&state.media, &image.public_id, "client update failed").await;
            }
            return Err(err.into());
        }
    };

    if let Some(new) = &input.image {
        let old = existing.image_ref();
        if new.public_id != old.public_id {
            release_image(&state.media, &old.public_id, "client image replaced").await;
        }
    }

    tracing::info!(client_id = %id, image_replaced = input.image.is_some(), "Client updated");
    Ok(Json(updated))
}

/// DELETE /api/clients/{id}
pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<MessageResponse>> {
    let client = state
        .store
        .find_client(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    release_image(&state.media, &client.image_public_id, "client deleted").await;

    if !state.store.delete_client(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(client_id = %id, "Client deleted");
    Ok(Json(MessageResponse::new("Client deleted successfully")))
}
