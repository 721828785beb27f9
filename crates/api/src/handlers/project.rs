//! Handlers for the `/projects` resource.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use realtrust_core::error::CoreError;
use realtrust_core::types::DbId;
use realtrust_core::validation::validate_input;
use realtrust_db::models::project::{CreateProject, Project, UpdateProject};
use realtrust_media::MediaProfile;

use crate::error::{AppError, AppResult};
use crate::handlers::form::ImageForm;
use crate::handlers::{release_image, RecordId};
use crate::response::MessageResponse;
use crate::state::AppState;

const PROFILE: MediaProfile = MediaProfile::Project;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = state.store.list_projects().await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<Project>> {
    let project = state
        .store
        .find_project(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(project))
}

/// POST /api/projects
///
/// The image is stored before the record is persisted; if persisting fails
/// the fresh upload is released again.
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let mut form = ImageForm::read(&mut multipart?, PROFILE).await?;

    let upload = form.image.take().ok_or(CoreError::MissingImage)?;
    let name = form.required_text("name", "Name")?;
    let description = form.required_text("description", "Description")?;

    let image = state
        .media
        .store(PROFILE, upload.data, &upload.file_name)
        .await?;

    let input = CreateProject {
        name,
        description,
        image: Some(image.clone()),
    };
    match state.store.create_project(&input).await {
        Ok(project) => {
            tracing::info!(project_id = %project.id, "Project created");
            Ok((StatusCode::CREATED, Json(project)))
        }
        Err(err) => {
            release_image(&state.media, &image.public_id, "project create failed").await;
            Err(err.into())
        }
    }
}

/// PUT /api/projects/{id}
///
/// Every part is optional. A new image replaces the old one, which is
/// deleted only after the record points at the new one.
pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Project>> {
    let mut form = ImageForm::read(&mut multipart?, PROFILE).await?;

    let mut input = UpdateProject {
        name: form.take_text("name"),
        description: form.take_text("description"),
        image: None,
    };
    validate_input(&input)?;

    let existing = state
        .store
        .find_project(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(upload) = form.image.take() {
        let image = state
            .media
            .store(PROFILE, upload.data, &upload.file_name)
            .await?;
        input.image = Some(image);
    }

    let updated = match state.store.update_project(id, &input).await {
        Ok(Some(project)) => project,
        Ok(None) => {
            if let Some(image) = &input.image {
                release_image(&state.media, &image.public_id, "project vanished during update")
                    .await;
            }
            return Err(not_found(id));
        }
        Err(err) => {
            if let Some(image) = &input.image {
                release_image(&state.media, &image.public_id, "project update failed").await;
            }
            return Err(err.into());
        }
    };

    if let (Some(new), Some(old)) = (&input.image, existing.image_ref()) {
        if new.public_id != old.public_id {
            release_image(&state.media, &old.public_id, "project image replaced").await;
        }
    }

    tracing::info!(project_id = %id, image_replaced = input.image.is_some(), "Project updated");
    Ok(Json(updated))
}

/// DELETE /api/projects/{id}
///
/// Media deletion is best-effort; the record is removed regardless.
pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<MessageResponse>> {
    let project = state
        .store
        .find_project(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(image) = project.image_ref() {
        release_image(&state.media, &image.public_id, "project deleted").await;
    }

    if !state.store.delete_project(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(project_id = %id, "Project deleted");
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
