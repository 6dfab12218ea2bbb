//! Post handlers for the admin API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::db::{DbPool, UserRepository};
use crate::post::{NewPost, PostRepository, PostService, PostStatus, PostUpdate};
use crate::web::dto::{
    ApiResponse, AuthorInfo, CreatePostRequest, PaginatedResponse, PaginationQuery,
    PostFilterQuery, PostResponse, UpdatePostRequest,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Look up author info, tolerating deleted accounts.
async fn author_info(pool: &DbPool, author_id: i64) -> AuthorInfo {
    UserRepository::new(pool)
        .get_by_id(author_id)
        .await
        .ok()
        .flatten()
        .map(|u| AuthorInfo {
            id: u.id,
            username: u.username,
            display_name: u.display_name,
        })
        .unwrap_or_else(|| AuthorInfo {
            id: author_id,
            username: "unknown".to_string(),
            display_name: "Unknown".to_string(),
        })
}

fn parse_status(value: &str) -> Result<PostStatus, ApiError> {
    value
        .parse()
        .map_err(|e: String| ApiError::bad_request(e))
}

/// GET /api/posts - List posts, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    params(PaginationQuery, PostFilterQuery),
    responses(
        (status = 200, description = "Paginated list of posts", body = Vec<PostResponse>)
    )
)]
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<PaginationQuery>,
    Query(filter): Query<PostFilterQuery>,
) -> Result<Json<PaginatedResponse<PostResponse>>, ApiError> {
    let repo = PostRepository::new(state.db.pool());
    let (offset, limit) = pagination.to_offset_limit();

    let (posts, total) = match filter.status.as_deref() {
        Some(status) => {
            let status = parse_status(status)?;
            let all = repo.list_by_status(status).await.map_err(|e| {
                tracing::error!("Failed to list posts: {}", e);
                ApiError::internal("Failed to list posts")
            })?;
            let total = all.len() as i64;
            let page: Vec<_> = all
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect();
            (page, total)
        }
        None => {
            let total = repo.count().await.map_err(|e| {
                tracing::error!("Failed to count posts: {}", e);
                ApiError::internal("Failed to list posts")
            })?;
            let page = repo.list_page(offset, limit).await.map_err(|e| {
                tracing::error!("Failed to list posts: {}", e);
                ApiError::internal("Failed to list posts")
            })?;
            (page, total)
        }
    };

    let mut responses = Vec::with_capacity(posts.len());
    for post in posts {
        let author = author_info(state.db.pool(), post.author_id).await;
        responses.push(PostResponse::from_post(post, author));
    }

    Ok(Json(PaginatedResponse::new(
        responses,
        pagination.page,
        pagination.per_page,
        total as u64,
    )))
}

/// POST /api/posts - Create a post.
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Post created", body = PostResponse),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    request
        .validate()
        .map_err(ApiError::from_validation_errors)?;

    let author = UserRepository::new(state.db.pool())
        .get_by_id(request.author_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up author: {}", e);
            ApiError::internal("Failed to create post")
        })?
        .ok_or_else(|| ApiError::unprocessable("Author does not exist"))?;

    let mut new_post = NewPost::new(request.title, request.body, author.id);
    if let Some(excerpt) = request.excerpt.filter(|s| !s.trim().is_empty()) {
        new_post = new_post.with_excerpt(excerpt);
    }
    if let Some(cover) = request.cover_image_url.filter(|s| !s.trim().is_empty()) {
        new_post = new_post.with_cover_image(cover);
    }
    if let Some(ref status) = request.status {
        new_post = new_post.with_status(parse_status(status)?);
    }

    let post = PostService::new(state.db.pool())
        .create(&new_post)
        .await
        .map_err(ApiError::from)?;

    let author = author_info(state.db.pool(), post.author_id).await;
    Ok(Json(ApiResponse::new(PostResponse::from_post(post, author))))
}

/// GET /api/posts/:id - Get a post.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post details", body = PostResponse),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let post = PostRepository::new(state.db.pool())
        .get_by_id(post_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get post: {}", e);
            ApiError::internal("Failed to get post")
        })?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let author = author_info(state.db.pool(), post.author_id).await;
    Ok(Json(ApiResponse::new(PostResponse::from_post(post, author))))
}

/// PUT /api/posts/:id - Update a post.
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 404, description = "Post not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    request
        .validate()
        .map_err(ApiError::from_validation_errors)?;

    let mut update = PostUpdate::new();
    if let Some(title) = request.title {
        update = update.title(title);
    }
    if let Some(body) = request.body {
        update = update.body(body);
    }
    if let Some(excerpt) = request.excerpt {
        // Empty string clears the field
        update = update.excerpt(Some(excerpt).filter(|s| !s.trim().is_empty()));
    }
    if let Some(cover) = request.cover_image_url {
        update = update.cover_image_url(Some(cover).filter(|s| !s.trim().is_empty()));
    }
    if let Some(ref status) = request.status {
        update = update.status(parse_status(status)?);
    }

    let post = PostService::new(state.db.pool())
        .update(post_id, &update)
        .await
        .map_err(ApiError::from)?;

    let author = author_info(state.db.pool(), post.author_id).await;
    Ok(Json(ApiResponse::new(PostResponse::from_post(post, author))))
}

/// POST /api/posts/:id/publish - Publish a post.
#[utoipa::path(
    post,
    path = "/posts/{id}/publish",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post published", body = PostResponse),
        (status = 404, description = "Post not found")
    )
)]
pub async fn publish_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let post = PostService::new(state.db.pool())
        .publish(post_id)
        .await
        .map_err(ApiError::from)?;

    let author = author_info(state.db.pool(), post.author_id).await;
    Ok(Json(ApiResponse::new(PostResponse::from_post(post, author))))
}

/// POST /api/posts/:id/archive - Archive a post.
#[utoipa::path(
    post,
    path = "/posts/{id}/archive",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post archived", body = PostResponse),
        (status = 404, description = "Post not found")
    )
)]
pub async fn archive_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let post = PostService::new(state.db.pool())
        .archive(post_id)
        .await
        .map_err(ApiError::from)?;

    let author = author_info(state.db.pool(), post.author_id).await;
    Ok(Json(ApiResponse::new(PostResponse::from_post(post, author))))
}

/// DELETE /api/posts/:id - Delete a post.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    PostService::new(state.db.pool())
        .delete(post_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::new(())))
}
