//! Web API user management tests.

mod common;

use axum::http::StatusCode;

use common::{create_test_server, data_id};
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_and_list_users() {
    let (server, _db, _tmp) = create_test_server().await;

    let response = server
        .post("/api/users")
        .json(&json!({
            "username": "maya",
            "display_name": "Maya",
            "email": "maya@example.com",
            "role": "editor"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["username"], "maya");
    assert_eq!(body["data"]["role"], "editor");
    assert_eq!(body["data"]["is_active"], true);

    let response = server.get("/api/users").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let (server, _db, _tmp) = create_test_server().await;

    server
        .post("/api/users")
        .json(&json!({ "username": "maya", "display_name": "Maya" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/users")
        .json(&json!({ "username": "maya", "display_name": "Other" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_user_validation() {
    let (server, _db, _tmp) = create_test_server().await;

    // Username too short
    let response = server
        .post("/api/users")
        .json(&json!({ "username": "ab", "display_name": "AB" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    // Bad email
    let response = server
        .post("/api/users")
        .json(&json!({
            "username": "valid",
            "display_name": "Valid",
            "email": "not-an-email"
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    // Bad role
    let response = server
        .post("/api/users")
        .json(&json!({
            "username": "valid",
            "display_name": "Valid",
            "role": "sysop"
        }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_user_role_and_deactivate() {
    let (server, _db, _tmp) = create_test_server().await;

    let response = server
        .post("/api/users")
        .json(&json!({ "username": "maya", "display_name": "Maya" }))
        .await;
    let user_id = data_id(&response.json::<Value>());

    let response = server
        .put(&format!("/api/users/{user_id}"))
        .json(&json!({ "role": "admin", "is_active": false }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["role"], "admin");
    assert_eq!(body["data"]["is_active"], false);
}

#[tokio::test]
async fn test_delete_user() {
    let (server, _db, _tmp) = create_test_server().await;

    let response = server
        .post("/api/users")
        .json(&json!({ "username": "maya", "display_name": "Maya" }))
        .await;
    let user_id = data_id(&response.json::<Value>());

    server
        .delete(&format!("/api/users/{user_id}"))
        .await
        .assert_status_ok();

    server
        .get(&format!("/api/users/{user_id}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_user_with_posts_conflicts() {
    let (server, _db, _tmp) = create_test_server().await;

    let response = server
        .post("/api/users")
        .json(&json!({ "username": "author", "display_name": "Author" }))
        .await;
    let user_id = data_id(&response.json::<Value>());

    server
        .post("/api/posts")
        .json(&json!({
            "title": "Owned",
            "body": "body",
            "author_id": user_id
        }))
        .await
        .assert_status_ok();

    let response = server.delete(&format!("/api/users/{user_id}")).await;
    response.assert_status(StatusCode::CONFLICT);
}
