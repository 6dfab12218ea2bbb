//! User handlers for the admin API.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::db::{NewUser, Role, UserRepository, UserUpdate};
use crate::web::dto::{ApiResponse, CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

fn parse_role(value: &str) -> Result<Role, ApiError> {
    value.parse().map_err(|e: String| ApiError::bad_request(e))
}

/// GET /api/users - List all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    let users = UserRepository::new(state.db.pool())
        .list_all()
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {}", e);
            ApiError::internal("Failed to list users")
        })?;

    let responses = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::new(responses)))
}

/// POST /api/users - Create a user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    request
        .validate()
        .map_err(ApiError::from_validation_errors)?;

    let repo = UserRepository::new(state.db.pool());

    let taken = repo.username_exists(&request.username).await.map_err(|e| {
        tracing::error!("Failed to check username: {}", e);
        ApiError::internal("Failed to create user")
    })?;
    if taken {
        return Err(ApiError::conflict("Username already taken"));
    }

    let mut new_user = NewUser::new(request.username, request.display_name);
    if let Some(email) = request.email.filter(|s| !s.trim().is_empty()) {
        new_user = new_user.with_email(email);
    }
    if let Some(ref role) = request.role {
        new_user = new_user.with_role(parse_role(role)?);
    }

    let user = repo.create(&new_user).await.map_err(ApiError::from)?;
    Ok(Json(ApiResponse::new(UserResponse::from(user))))
}

/// GET /api/users/:id - Get a user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = UserRepository::new(state.db.pool())
        .get_by_id(user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user: {}", e);
            ApiError::internal("Failed to get user")
        })?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(UserResponse::from(user))))
}

/// PUT /api/users/:id - Update a user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    request
        .validate()
        .map_err(ApiError::from_validation_errors)?;

    let mut update = UserUpdate::new();
    if let Some(display_name) = request.display_name {
        update = update.display_name(display_name);
    }
    if let Some(email) = request.email {
        // Empty string clears the address
        update = update.email(Some(email).filter(|s| !s.trim().is_empty()));
    }
    if let Some(ref role) = request.role {
        update = update.role(parse_role(role)?);
    }
    if let Some(is_active) = request.is_active {
        update = update.is_active(is_active);
    }

    let user = UserRepository::new(state.db.pool())
        .update(user_id, &update)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user: {}", e);
            ApiError::internal("Failed to update user")
        })?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(UserResponse::from(user))))
}

/// DELETE /api/users/:id - Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User still owns posts")
    )
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = UserRepository::new(state.db.pool())
        .delete(user_id)
        .await
        .map_err(|e| {
            // Posts reference their author; surface the FK violation as a conflict
            tracing::warn!("Failed to delete user {}: {}", user_id, e);
            ApiError::conflict("User still owns posts; reassign or delete them first")
        })?;

    if !deleted {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(Json(ApiResponse::new(())))
}
