//! Contact inbox handlers for the admin API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::contact::{ContactRepository, NewContactMessage};
use crate::web::dto::{
    ApiResponse, ContactFilterQuery, ContactResponse, CreateContactRequest,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /api/contacts - List contact messages.
#[utoipa::path(
    get,
    path = "/contacts",
    tag = "contacts",
    params(ContactFilterQuery),
    responses(
        (status = 200, description = "List of contact messages", body = Vec<ContactResponse>)
    )
)]
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ContactFilterQuery>,
) -> Result<Json<ApiResponse<Vec<ContactResponse>>>, ApiError> {
    let repo = ContactRepository::new(state.db.pool());

    let messages = if filter.unread {
        repo.list_unread().await
    } else {
        repo.list_all().await
    }
    .map_err(|e| {
        tracing::error!("Failed to list contacts: {}", e);
        ApiError::internal("Failed to list contacts")
    })?;

    let responses = messages.into_iter().map(ContactResponse::from).collect();
    Ok(Json(ApiResponse::new(responses)))
}

/// POST /api/contacts - Store a contact form submission.
#[utoipa::path(
    post,
    path = "/contacts",
    tag = "contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 200, description = "Message stored", body = ContactResponse),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_contact(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateContactRequest>,
) -> Result<Json<ApiResponse<ContactResponse>>, ApiError> {
    request
        .validate()
        .map_err(ApiError::from_validation_errors)?;

    let message = ContactRepository::new(state.db.pool())
        .create(&NewContactMessage::new(
            request.name,
            request.email,
            request.subject,
            request.body,
        ))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::new(ContactResponse::from(message))))
}

/// PUT /api/contacts/:id/read - Mark a message as read.
#[utoipa::path(
    put,
    path = "/contacts/{id}/read",
    tag = "contacts",
    params(("id" = i64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message marked read", body = ContactResponse),
        (status = 404, description = "Message not found")
    )
)]
pub async fn mark_contact_read(
    State(state): State<Arc<AppState>>,
    Path(contact_id): Path<i64>,
) -> Result<Json<ApiResponse<ContactResponse>>, ApiError> {
    let message = ContactRepository::new(state.db.pool())
        .mark_read(contact_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to mark contact read: {}", e);
            ApiError::internal("Failed to update message")
        })?
        .ok_or_else(|| ApiError::not_found("Message not found"))?;

    Ok(Json(ApiResponse::new(ContactResponse::from(message))))
}

/// DELETE /api/contacts/:id - Delete a message.
#[utoipa::path(
    delete,
    path = "/contacts/{id}",
    tag = "contacts",
    params(("id" = i64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message deleted"),
        (status = 404, description = "Message not found")
    )
)]
pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path(contact_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = ContactRepository::new(state.db.pool())
        .delete(contact_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete contact: {}", e);
            ApiError::internal("Failed to delete message")
        })?;

    if !deleted {
        return Err(ApiError::not_found("Message not found"));
    }

    Ok(Json(ApiResponse::new(())))
}
