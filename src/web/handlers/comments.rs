//! Comment handlers for the admin API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::comment::{CommentRepository, CommentStatus, NewComment};
use crate::post::PostRepository;
use crate::web::dto::{
    ApiResponse, CommentFilterQuery, CommentResponse, CreateCommentRequest,
    UpdateCommentStatusRequest,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

fn parse_status(value: &str) -> Result<CommentStatus, ApiError> {
    value.parse().map_err(|e: String| ApiError::bad_request(e))
}

/// GET /api/comments - List comments by post or moderation status.
#[utoipa::path(
    get,
    path = "/comments",
    tag = "comments",
    params(CommentFilterQuery),
    responses(
        (status = 200, description = "List of comments", body = Vec<CommentResponse>)
    )
)]
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<CommentFilterQuery>,
) -> Result<Json<ApiResponse<Vec<CommentResponse>>>, ApiError> {
    let repo = CommentRepository::new(state.db.pool());

    let comments = match (filter.post_id, filter.status.as_deref()) {
        (Some(post_id), _) => repo.list_by_post(post_id).await,
        (None, Some(status)) => repo.list_by_status(parse_status(status)?).await,
        (None, None) => repo.list_by_status(CommentStatus::Pending).await,
    }
    .map_err(|e| {
        tracing::error!("Failed to list comments: {}", e);
        ApiError::internal("Failed to list comments")
    })?;

    let responses = comments.into_iter().map(CommentResponse::from).collect();
    Ok(Json(ApiResponse::new(responses)))
}

/// POST /api/comments - Submit a comment.
#[utoipa::path(
    post,
    path = "/comments",
    tag = "comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment created", body = CommentResponse),
        (status = 422, description = "Validation failed or post missing")
    )
)]
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<Json<ApiResponse<CommentResponse>>, ApiError> {
    request
        .validate()
        .map_err(ApiError::from_validation_errors)?;

    let post = PostRepository::new(state.db.pool())
        .get_by_id(request.post_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up post: {}", e);
            ApiError::internal("Failed to create comment")
        })?;
    if post.is_none() {
        return Err(ApiError::unprocessable("Post does not exist"));
    }

    let comment = CommentRepository::new(state.db.pool())
        .create(&NewComment::new(
            request.post_id,
            request.author_name,
            request.author_email,
            request.body,
        ))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::new(CommentResponse::from(comment))))
}

/// PUT /api/comments/:id/status - Moderate a comment.
#[utoipa::path(
    put,
    path = "/comments/{id}/status",
    tag = "comments",
    params(("id" = i64, Path, description = "Comment ID")),
    request_body = UpdateCommentStatusRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn update_comment_status(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<i64>,
    Json(request): Json<UpdateCommentStatusRequest>,
) -> Result<Json<ApiResponse<CommentResponse>>, ApiError> {
    let status = parse_status(&request.status)?;

    let comment = CommentRepository::new(state.db.pool())
        .set_status(comment_id, status)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update comment: {}", e);
            ApiError::internal("Failed to update comment")
        })?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    Ok(Json(ApiResponse::new(CommentResponse::from(comment))))
}

/// DELETE /api/comments/:id - Delete a comment.
#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "comments",
    params(("id" = i64, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = CommentRepository::new(state.db.pool())
        .delete(comment_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete comment: {}", e);
            ApiError::internal("Failed to delete comment")
        })?;

    if !deleted {
        return Err(ApiError::not_found("Comment not found"));
    }

    Ok(Json(ApiResponse::new(())))
}
