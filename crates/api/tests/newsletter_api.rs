//! HTTP-level integration tests for `/api/newsletter`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, TestApp};
use serde_json::json;

async fn subscription_count(app: &TestApp) -> usize {
    let json = body_json(get(app.app(), "/api/newsletter").await).await;
    json.as_array().unwrap().len()
}

#[tokio::test]
async fn subscribe_returns_201_with_record() {
    let app = TestApp::new();
    let response = post_json(app.app(), "/api/newsletter", json!({"email": "a@b.co"})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Successfully subscribed to newsletter");
    assert_eq!(json["data"]["email"], "a@b.co");
    assert!(json["data"]["_id"].is_string());
}

#[tokio::test]
async fn second_subscription_is_rejected_and_only_one_stored() {
    let app = TestApp::new();
    let first = post_json(app.app(), "/api/newsletter", json!({"email": "a@b.co"})).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app.app(), "/api/newsletter", json!({"email": "a@b.co"})).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let json = body_json(second).await;
    assert_eq!(json["code"], "DUPLICATE");
    assert_eq!(json["message"], "Email already subscribed");

    assert_eq!(subscription_count(&app).await, 1);
}

#[tokio::test]
async fn email_match_is_case_sensitive() {
    let app = TestApp::new();
    post_json(app.app(), "/api/newsletter", json!({"email": "a@b.co"})).await;
    let response = post_json(app.app(), "/api/newsletter", json!({"email": "A@b.co"})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(subscription_count(&app).await, 2);
}

#[tokio::test]
async fn missing_email_is_rejected() {
    let app = TestApp::new();
    let response = post_json(app.app(), "/api/newsletter", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Email is required");
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let app = TestApp::new();
    let response = post_json(app.app(), "/api/newsletter", json!({"email": "nope"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert_eq!(subscription_count(&app).await, 0);
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = TestApp::new();
    post_json(app.app(), "/api/newsletter", json!({"email": "first@b.co"})).await;
    post_json(app.app(), "/api/newsletter", json!({"email": "second@b.co"})).await;

    let json = body_json(get(app.app(), "/api/newsletter").await).await;
    assert_eq!(json[0]["email"], "second@b.co");
    assert_eq!(json[1]["email"], "first@b.co");
}

#[tokio::test]
async fn unsubscribe_allows_resubscribe() {
    let app = TestApp::new();
    let created = body_json(
        post_json(app.app(), "/api/newsletter", json!({"email": "a@b.co"})).await,
    )
    .await;
    let id = created["data"]["_id"].as_str().unwrap();

    let response = delete(app.app(), &format!("/api/newsletter/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Subscription deleted successfully"
    );

    let again = post_json(app.app(), "/api/newsletter", json!({"email": "a@b.co"})).await;
    assert_eq!(again.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn delete_unknown_subscription_returns_404() {
    let app = TestApp::new();
    let response = delete(
        app.app(),
        "/api/newsletter/0190f5c2-7b7e-7a4f-9c1e-3f2a1b0c9d8e",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
