//! The record store seam.
//!
//! [`RecordStore`] is the only shared mutable resource in the service. Every
//! create and update validates its DTO here before touching storage, so the
//! schema rules hold no matter which controller (or test) calls in.

use async_trait::async_trait;
use realtrust_core::error::CoreError;
use realtrust_core::types::DbId;
use realtrust_core::validation::validate_input;

use crate::error::{StoreError, StoreResult};
use crate::models::client::{Client, CreateClient, UpdateClient};
use crate::models::contact::{Contact, CreateContact};
use crate::models::newsletter::{CreateSubscription, Subscription};
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::repositories::{ClientRepo, ContactRepo, ProjectRepo, SubscriptionRepo};
use crate::DbPool;

/// Name of the unique index backing newsletter email uniqueness.
pub const NEWSLETTER_EMAIL_CONSTRAINT: &str = "uq_newsletter_subscriptions_email";

/// Message used for every duplicate-subscription rejection.
pub const DUPLICATE_SUBSCRIPTION: &str = "Email already subscribed";

/// Persistence for the four record kinds.
///
/// Lists are ordered newest first. `find_*` returns `None` and `delete_*`
/// returns `false` for unknown ids; `update_*` returns `None`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Confirm the backing storage is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    async fn list_projects(&self) -> StoreResult<Vec<Project>>;
    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>>;
    async fn create_project(&self, input: &CreateProject) -> StoreResult<Project>;
    async fn update_project(&self, id: DbId, input: &UpdateProject)
        -> StoreResult<Option<Project>>;
    async fn delete_project(&self, id: DbId) -> StoreResult<bool>;

    async fn list_clients(&self) -> StoreResult<Vec<Client>>;
    async fn find_client(&self, id: DbId) -> StoreResult<Option<Client>>;
    async fn create_client(&self, input: &CreateClient) -> StoreResult<Client>;
    async fn update_client(&self, id: DbId, input: &UpdateClient) -> StoreResult<Option<Client>>;
    async fn delete_client(&self, id: DbId) -> StoreResult<bool>;

    async fn list_contacts(&self) -> StoreResult<Vec<Contact>>;
    async fn create_contact(&self, input: &CreateContact) -> StoreResult<Contact>;
    async fn delete_contact(&self, id: DbId) -> StoreResult<bool>;

    async fn list_subscriptions(&self) -> StoreResult<Vec<Subscription>>;
    /// Exact, case-sensitive match on the stored email.
    async fn find_subscription_by_email(&self, email: &str)
        -> StoreResult<Option<Subscription>>;
    /// Fails with [`CoreError::Duplicate`] if the email is already subscribed.
    async fn create_subscription(&self, input: &CreateSubscription) -> StoreResult<Subscription>;
    async fn delete_subscription(&self, id: DbId) -> StoreResult<bool>;
}

// ---------------------------------------------------------------------------
// PostgreSQL backend
// ---------------------------------------------------------------------------

/// [`RecordStore`] backed by PostgreSQL through the repository structs.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Whether `err` is a PostgreSQL unique violation (SQLSTATE 23505) on the
/// named constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

/// Map a failed subscription insert. A unique violation on the email index
/// becomes [`CoreError::Duplicate`]; anything else stays a database error.
pub fn subscription_insert_error(err: sqlx::Error) -> StoreError {
    if is_unique_violation(&err, NEWSLETTER_EMAIL_CONSTRAINT) {
        tracing::debug!("Concurrent duplicate subscription rejected");
        StoreError::Core(CoreError::Duplicate(DUPLICATE_SUBSCRIPTION.into()))
    } else {
        StoreError::Database(err)
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(ProjectRepo::list(&self.pool).await?)
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_project(&self, input: &CreateProject) -> StoreResult<Project> {
        validate_input(input)?;
        Ok(ProjectRepo::create(&self.pool, input).await?)
    }

    async fn update_project(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> StoreResult<Option<Project>> {
        validate_input(input)?;
        Ok(ProjectRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<bool> {
        Ok(ProjectRepo::delete(&self.pool, id).await?)
    }

    async fn list_clients(&self) -> StoreResult<Vec<Client>> {
        Ok(ClientRepo::list(&self.pool).await?)
    }

    async fn find_client(&self, id: DbId) -> StoreResult<Option<Client>> {
        Ok(ClientRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_client(&self, input: &CreateClient) -> StoreResult<Client> {
        validate_input(input)?;
        Ok(ClientRepo::create(&self.pool, input).await?)
    }

    async fn update_client(&self, id: DbId, input: &UpdateClient) -> StoreResult<Option<Client>> {
        validate_input(input)?;
        Ok(ClientRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_client(&self, id: DbId) -> StoreResult<bool> {
        Ok(ClientRepo::delete(&self.pool, id).await?)
    }

    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        Ok(ContactRepo::list(&self.pool).await?)
    }

    async fn create_contact(&self, input: &CreateContact) -> StoreResult<Contact> {
        validate_input(input)?;
        Ok(ContactRepo::create(&self.pool, input).await?)
    }

    async fn delete_contact(&self, id: DbId) -> StoreResult<bool> {
        Ok(ContactRepo::delete(&self.pool, id).await?)
    }

    async fn list_subscriptions(&self) -> StoreResult<Vec<Subscription>> {
        Ok(SubscriptionRepo::list(&self.pool).await?)
    }

    async fn find_subscription_by_email(&self, email: &str) -> StoreResult<Option<Subscription>> {
        Ok(SubscriptionRepo::find_by_email(&self.pool, email).await?)
    }

    async fn create_subscription(&self, input: &CreateSubscription) -> StoreResult<Subscription> {
        validate_input(input)?;

        if SubscriptionRepo::find_by_email(&self.pool, &input.email)
            .await?
            .is_some()
        {
            return Err(CoreError::Duplicate(DUPLICATE_SUBSCRIPTION.into()).into());
        }

        // The index catches a concurrent insert that slipped past the check.
        SubscriptionRepo::create(&self.pool, input)
            .await
            .map_err(subscription_insert_error)
    }

    async fn delete_subscription(&self, id: DbId) -> StoreResult<bool> {
        Ok(SubscriptionRepo::delete(&self.pool, id).await?)
    }
}
