//! Handlers for the `/newsletter` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use realtrust_core::error::CoreError;
use realtrust_core::validation::require_non_empty;
use realtrust_db::models::newsletter::{CreateSubscription, Subscription};
use realtrust_db::store::DUPLICATE_SUBSCRIPTION;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::RecordId;
use crate::response::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: Option<String>,
}

/// GET /api/newsletter
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Subscription>>> {
    let subscriptions = state.store.list_subscriptions().await?;
    Ok(Json(subscriptions))
}

/// POST /api/newsletter
///
/// Checks for an existing subscription first so a repeat gets the duplicate
/// message before any insert is attempted.
pub async fn subscribe(
    State(state): State<AppState>,
    payload: Result<Json<SubscribeForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageResponse<Subscription>>)> {
    let Json(form) = payload?;
    require_non_empty("Email", form.email.as_deref())?;
    let input = CreateSubscription {
        email: form.email.unwrap_or_default(),
    };

    if state
        .store
        .find_subscription_by_email(&input.email)
        .await?
        .is_some()
    {
        return Err(CoreError::Duplicate(DUPLICATE_SUBSCRIPTION.into()).into());
    }

    let subscription = state.store.create_subscription(&input).await?;
    tracing::info!(subscription_id = %subscription.id, "Newsletter subscription stored");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_data(
            "Successfully subscribed to newsletter",
            subscription,
        )),
    ))
}

/// DELETE /api/newsletter/{id}
pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<MessageResponse>> {
    if !state.store.delete_subscription(id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            id,
        }));
    }
    tracing::info!(subscription_id = %id, "Newsletter subscription deleted");
    Ok(Json(MessageResponse::new("Subscription deleted successfully")))
}
