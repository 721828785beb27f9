//! In-process [`RecordStore`] backend.
//!
//! Collections are append-only vectors behind one `tokio::sync::RwLock`, so
//! insertion order is creation order and listing walks them in reverse.
//! Used by the API integration tests; it applies the same validation and
//! duplicate rules as the PostgreSQL backend.

use async_trait::async_trait;
use chrono::Utc;
use realtrust_core::error::CoreError;
use realtrust_core::types::{new_id, DbId};
use realtrust_core::validation::validate_input;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::models::client::{Client, CreateClient, UpdateClient};
use crate::models::contact::{Contact, CreateContact};
use crate::models::newsletter::{CreateSubscription, Subscription};
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::store::{RecordStore, DUPLICATE_SUBSCRIPTION};

#[derive(Default)]
struct Collections {
    projects: Vec<Project>,
    clients: Vec<Client>,
    contacts: Vec<Contact>,
    subscriptions: Vec<Subscription>,
}

/// Memory-backed record store.
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Collections>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T: Clone>(items: &[T]) -> Vec<T> {
    items.iter().rev().cloned().collect()
}

/// Remove the first element matching `pred`. Returns `true` if one was removed.
fn remove_where<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    match items.iter().position(pred) {
        Some(idx) => {
            items.remove(idx);
            true
        }
        None => false,
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(newest_first(&self.inner.read().await.projects))
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        let inner = self.inner.read().await;
        Ok(inner.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn create_project(&self, input: &CreateProject) -> StoreResult<Project> {
        validate_input(input)?;
        let now = Utc::now();
        let project = Project {
            id: new_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            image: input.image.as_ref().map(|i| i.url.clone()),
            image_public_id: input.image.as_ref().map(|i| i.public_id.clone()),
            created_at: now,
            updated_at: now,
        };
        self.inner.write().await.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> StoreResult<Option<Project>> {
        validate_input(input)?;
        let mut inner = self.inner.write().await;
        let Some(project) = inner.projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            project.name = name.clone();
        }
        if let Some(description) = &input.description {
            project.description = description.clone();
        }
        if let Some(image) = &input.image {
            project.image = Some(image.url.clone());
            project.image_public_id = Some(image.public_id.clone());
        }
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(remove_where(&mut inner.projects, |p| p.id == id))
    }

    async fn list_clients(&self) -> StoreResult<Vec<Client>> {
        Ok(newest_first(&self.inner.read().await.clients))
    }

    async fn find_client(&self, id: DbId) -> StoreResult<Option<Client>> {
        let inner = self.inner.read().await;
        Ok(inner.clients.iter().find(|c| c.id == id).cloned())
    }

    async fn create_client(&self, input: &CreateClient) -> StoreResult<Client> {
        validate_input(input)?;
        let now = Utc::now();
        let client = Client {
            id: new_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            designation: input.designation.clone(),
            image: input.image.url.clone(),
            image_public_id: input.image.public_id.clone(),
            created_at: now,
            updated_at: now,
        };
        self.inner.write().await.clients.push(client.clone());
        Ok(client)
    }

    async fn update_client(&self, id: DbId, input: &UpdateClient) -> StoreResult<Option<Client>> {
        validate_input(input)?;
        let mut inner = self.inner.write().await;
        let Some(client) = inner.clients.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            client.name = name.clone();
        }
        if let Some(description) = &input.description {
            client.description = description.clone();
        }
        if let Some(designation) = &input.designation {
            client.designation = designation.clone();
        }
        if let Some(image) = &input.image {
            client.image = image.url.clone();
            client.image_public_id = image.public_id.clone();
        }
        client.updated_at = Utc::now();
        Ok(Some(client.clone()))
    }

    async fn delete_client(&self, id: DbId) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(remove_where(&mut inner.clients, |c| c.id == id))
    }

    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        Ok(newest_first(&self.inner.read().await.contacts))
    }

    async fn create_contact(&self, input: &CreateContact) -> StoreResult<Contact> {
        validate_input(input)?;
        let now = Utc::now();
        let contact = Contact {
            id: new_id(),
            full_name: input.full_name.clone(),
            email: input.email.clone(),
            mobile: input.mobile.clone(),
            city: input.city.clone(),
            created_at: now,
            updated_at: now,
        };
        self.inner.write().await.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn delete_contact(&self, id: DbId) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(remove_where(&mut inner.contacts, |c| c.id == id))
    }

    async fn list_subscriptions(&self) -> StoreResult<Vec<Subscription>> {
        Ok(newest_first(&self.inner.read().await.subscriptions))
    }

    async fn find_subscription_by_email(&self, email: &str) -> StoreResult<Option<Subscription>> {
        let inner = self.inner.read().await;
        Ok(inner.subscriptions.iter().find(|s| s.email == email).cloned())
    }

    async fn create_subscription(&self, input: &CreateSubscription) -> StoreResult<Subscription> {
        validate_input(input)?;
        // Check and insert under one write guard.
        let mut inner = self.inner.write().await;
        if inner.subscriptions.iter().any(|s| s.email == input.email) {
            return Err(CoreError::Duplicate(DUPLICATE_SUBSCRIPTION.into()).into());
        }
        let now = Utc::now();
        let subscription = Subscription {
            id: new_id(),
            email: input.email.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    async fn delete_subscription(&self, id: DbId) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(remove_where(&mut inner.subscriptions, |s| s.id == id))
    }
}
