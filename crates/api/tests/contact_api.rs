//! HTTP-level integration tests for `/api/contacts`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, post_raw_json, TestApp};
use serde_json::json;

fn valid_contact() -> serde_json::Value {
    json!({
        "fullName": "Asha Rao",
        "email": "asha@example.com",
        "mobile": "9876543210",
        "city": "Pune",
    })
}

async fn contact_count(app: &TestApp) -> usize {
    let json = body_json(get(app.app(), "/api/contacts").await).await;
    json.as_array().unwrap().len()
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_submission_is_listed_with_server_fields() {
    let app = TestApp::new();

    let response = post_json(app.app(), "/api/contacts", valid_contact()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Contact form submitted successfully");
    assert_eq!(json["data"]["fullName"], "Asha Rao");
    let id = json["data"]["_id"].as_str().unwrap().to_string();

    let list = body_json(get(app.app(), "/api/contacts").await).await;
    let stored = &list.as_array().unwrap()[0];
    assert_eq!(stored["_id"], id.as_str());
    assert_eq!(stored["email"], "asha@example.com");
    assert_eq!(stored["mobile"], "9876543210");
    assert_eq!(stored["city"], "Pune");
    assert!(stored["createdAt"].is_string());
}

#[tokio::test]
async fn short_mobile_is_rejected_and_not_persisted() {
    let app = TestApp::new();
    let mut body = valid_contact();
    body["mobile"] = json!("12345");

    let response = post_json(app.app(), "/api/contacts", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Please enter a valid mobile number");
    assert_eq!(contact_count(&app).await, 0);
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let app = TestApp::new();
    let mut body = valid_contact();
    body["email"] = json!("not-an-email");

    let response = post_json(app.app(), "/api/contacts", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Please enter a valid email"
    );
    assert_eq!(contact_count(&app).await, 0);
}

#[tokio::test]
async fn one_character_name_is_rejected() {
    let app = TestApp::new();
    let mut body = valid_contact();
    body["fullName"] = json!("A");

    let response = post_json(app.app(), "/api/contacts", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Name must be at least 2 characters"
    );
}

#[tokio::test]
async fn missing_field_is_rejected() {
    let app = TestApp::new();
    let response = post_json(
        app.app(),
        "/api/contacts",
        json!({"fullName": "Asha Rao", "email": "asha@example.com", "mobile": "9876543210"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "All fields are required");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new();
    let response = post_raw_json(app.app(), "/api/contacts", "{\"fullName\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_contact_then_404() {
    let app = TestApp::new();
    let created = body_json(post_json(app.app(), "/api/contacts", valid_contact()).await).await;
    let id = created["data"]["_id"].as_str().unwrap();

    let response = delete(app.app(), &format!("/api/contacts/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Contact deleted successfully"})
    );
    assert_eq!(contact_count(&app).await, 0);

    let response = delete(app.app(), &format!("/api/contacts/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
