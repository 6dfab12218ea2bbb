//! Test helpers for Web API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::Value;
use tempfile::TempDir;

use quillboard::file::FileStore;
use quillboard::web::handlers::AppState;
use quillboard::web::router::create_router;
use quillboard::{Database, NewUser, Role, UserRepository};

/// Create a test server over an in-memory database and a temp file store.
///
/// The TempDir must be kept alive for the duration of the test.
pub async fn create_test_server() -> (TestServer, Arc<Database>, TempDir) {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::new(temp_dir.path()).expect("Failed to create file store");

    let app_state = Arc::new(AppState::new(db.clone(), store, 5));
    let router = create_router(app_state, &[]);

    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db, temp_dir)
}

/// Create a user directly in the database, returning its ID.
pub async fn create_test_user(db: &Arc<Database>, username: &str, role: Role) -> i64 {
    UserRepository::new(db.pool())
        .create(&NewUser::new(username, username).with_role(role))
        .await
        .expect("Failed to create test user")
        .id
}

/// Extract `data.id` from a response body.
pub fn data_id(body: &Value) -> i64 {
    body["data"]["id"].as_i64().expect("response has no data.id")
}
