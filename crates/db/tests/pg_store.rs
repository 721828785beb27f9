//! Integration tests for the PostgreSQL record store and its repositories:
//! - Partial updates through `COALESCE`
//! - Newest-first ordering
//! - Newsletter uniqueness, including the unique-index fallback
//! - Schema CHECK constraints as a backstop under validation

use assert_matches::assert_matches;
use realtrust_core::error::CoreError;
use realtrust_core::types::{new_id, ImageRef};
use realtrust_db::error::StoreError;
use realtrust_db::models::client::{CreateClient, UpdateClient};
use realtrust_db::models::contact::CreateContact;
use realtrust_db::models::newsletter::CreateSubscription;
use realtrust_db::models::project::{CreateProject, UpdateProject};
use realtrust_db::repositories::{ContactRepo, SubscriptionRepo};
use realtrust_db::store::{
    is_unique_violation, subscription_insert_error, PgRecordStore, RecordStore,
    DUPLICATE_SUBSCRIPTION, NEWSLETTER_EMAIL_CONSTRAINT,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn image(handle: &str) -> ImageRef {
    ImageRef {
        url: format!("https://media.example.com/{handle}.jpg"),
        public_id: handle.to_string(),
    }
}

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: "Three-bedroom villa".to_string(),
        image: Some(image(name)),
    }
}

fn new_client(name: &str) -> CreateClient {
    CreateClient {
        name: name.to_string(),
        description: "Great service".to_string(),
        designation: "CEO".to_string(),
        image: image(name),
    }
}

fn new_contact(mobile: &str) -> CreateContact {
    CreateContact {
        full_name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        mobile: mobile.to_string(),
        city: "Pune".to_string(),
    }
}

fn subscription(email: &str) -> CreateSubscription {
    CreateSubscription {
        email: email.to_string(),
    }
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| code.into_owned())
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn projects_are_listed_newest_first(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    for name in ["first", "second", "third"] {
        store.create_project(&new_project(name)).await.unwrap();
    }

    let names: Vec<String> = store
        .list_projects()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["third", "second", "first"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn partial_project_update_keeps_other_fields(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    let created = store.create_project(&new_project("Skyline")).await.unwrap();

    let update = UpdateProject {
        description: Some("Renovated penthouse".to_string()),
        ..Default::default()
    };
    let updated = store
        .update_project(created.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Skyline");
    assert_eq!(updated.description, "Renovated penthouse");
    assert_eq!(updated.image_ref(), Some(image("Skyline")));
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn project_update_replaces_image_pair_together(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    let created = store.create_project(&new_project("old")).await.unwrap();

    let update = UpdateProject {
        image: Some(image("new")),
        ..Default::default()
    };
    let updated = store
        .update_project(created.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "old");
    assert_eq!(updated.image_ref(), Some(image("new")));
}

#[sqlx::test(migrations = "./migrations")]
async fn project_update_unknown_id_returns_none(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    let update = UpdateProject {
        name: Some("Ghost".to_string()),
        ..Default::default()
    };

    let result = store.update_project(new_id(), &update).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn project_image_pair_is_enforced_by_schema(pool: PgPool) {
    let err = sqlx::query(
        "INSERT INTO projects (id, name, description, image_url) VALUES ($1, $2, $3, $4)",
    )
    .bind(new_id())
    .bind("Half")
    .bind("Only a url")
    .bind("https://media.example.com/half.jpg")
    .execute(&pool)
    .await
    .unwrap_err();

    assert_eq!(sqlstate(&err).as_deref(), Some("23514"));
    assert_eq!(
        err.as_database_error().and_then(|db_err| db_err.constraint()),
        Some("ck_projects_image_pair")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn project_delete_removes_row_once(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    let project = store.create_project(&new_project("Gone")).await.unwrap();

    assert!(store.delete_project(project.id).await.unwrap());
    assert!(!store.delete_project(project.id).await.unwrap());
    assert!(store.find_project(project.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn partial_client_update_keeps_other_fields(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    let created = store.create_client(&new_client("Priya")).await.unwrap();

    let update = UpdateClient {
        designation: Some("Founder".to_string()),
        ..Default::default()
    };
    let updated = store
        .update_client(created.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Priya");
    assert_eq!(updated.description, "Great service");
    assert_eq!(updated.designation, "Founder");
    assert_eq!(updated.image_ref(), image("Priya"));
}

#[sqlx::test(migrations = "./migrations")]
async fn clients_are_listed_newest_first(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    for name in ["Asha", "Ben"] {
        store.create_client(&new_client(name)).await.unwrap();
    }

    let names: Vec<String> = store
        .list_clients()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Ben", "Asha"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn blank_client_name_never_reaches_database(pool: PgPool) {
    let store = PgRecordStore::new(pool);

    let err = store.create_client(&new_client("   ")).await.unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));
    assert!(store.list_clients().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn invalid_mobile_is_rejected_before_insert(pool: PgPool) {
    let store = PgRecordStore::new(pool);

    let err = store
        .create_contact(&new_contact("12345"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Validation(msg)) => {
        assert_eq!(msg, "Please enter a valid mobile number");
    });
    assert!(store.list_contacts().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn mobile_format_is_enforced_by_schema(pool: PgPool) {
    let err = ContactRepo::create(&pool, &new_contact("98765-43210"))
        .await
        .unwrap_err();

    assert_eq!(sqlstate(&err).as_deref(), Some("23514"));
}

#[sqlx::test(migrations = "./migrations")]
async fn contact_round_trips_through_store(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    let contact = store
        .create_contact(&new_contact("9876543210"))
        .await
        .unwrap();

    let listed = store.list_contacts().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, contact.id);
    assert_eq!(listed[0].mobile, "9876543210");

    assert!(store.delete_contact(contact.id).await.unwrap());
    assert!(store.list_contacts().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Newsletter
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_subscription_is_rejected(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    store
        .create_subscription(&subscription("news@example.com"))
        .await
        .unwrap();

    let err = store
        .create_subscription(&subscription("news@example.com"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Duplicate(msg)) => {
        assert_eq!(msg, DUPLICATE_SUBSCRIPTION);
    });
    assert_eq!(store.list_subscriptions().await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn unique_index_violation_maps_to_duplicate(pool: PgPool) {
    let input = subscription("race@example.com");
    SubscriptionRepo::create(&pool, &input).await.unwrap();

    // A second insert that skipped the existence check.
    let err = SubscriptionRepo::create(&pool, &input).await.unwrap_err();
    assert!(is_unique_violation(&err, NEWSLETTER_EMAIL_CONSTRAINT));

    assert_matches!(
        subscription_insert_error(err),
        StoreError::Core(CoreError::Duplicate(msg)) => {
            assert_eq!(msg, DUPLICATE_SUBSCRIPTION);
        }
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn email_match_is_case_sensitive(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    store
        .create_subscription(&subscription("news@example.com"))
        .await
        .unwrap();
    store
        .create_subscription(&subscription("News@Example.com"))
        .await
        .unwrap();

    assert!(store
        .find_subscription_by_email("NEWS@EXAMPLE.COM")
        .await
        .unwrap()
        .is_none());
    assert_eq!(store.list_subscriptions().await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn health_check_succeeds_against_live_pool(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    store.health_check().await.unwrap();
}
