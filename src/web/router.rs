//! Router configuration for the admin API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, AppState};
use super::middleware::create_cors_layer;

/// OpenAPI documentation for the admin API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::posts::list_posts,
        handlers::posts::create_post,
        handlers::posts::get_post,
        handlers::posts::update_post,
        handlers::posts::publish_post,
        handlers::posts::archive_post,
        handlers::posts::delete_post,
        handlers::comments::list_comments,
        handlers::comments::create_comment,
        handlers::comments::update_comment_status,
        handlers::comments::delete_comment,
        handlers::contacts::list_contacts,
        handlers::contacts::create_contact,
        handlers::contacts::mark_contact_read,
        handlers::contacts::delete_contact,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::files::list_files,
        handlers::files::upload_file,
        handlers::files::get_file,
        handlers::files::download_file,
        handlers::files::delete_file,
        handlers::files::run_file_operation,
        handlers::files::preflight_file_operation,
    ),
    components(schemas(
        crate::web::dto::CreatePostRequest,
        crate::web::dto::UpdatePostRequest,
        crate::web::dto::CreateCommentRequest,
        crate::web::dto::UpdateCommentStatusRequest,
        crate::web::dto::CreateContactRequest,
        crate::web::dto::CreateUserRequest,
        crate::web::dto::UpdateUserRequest,
        crate::web::dto::FileOperationRequest,
        crate::web::dto::OperationOptions,
        crate::web::dto::PostResponse,
        crate::web::dto::CommentResponse,
        crate::web::dto::ContactResponse,
        crate::web::dto::UserResponse,
        crate::web::dto::FileResponse,
        crate::web::dto::FileErrorResponse,
        crate::web::dto::OperationSummary,
        crate::web::dto::OperationResponse,
        crate::web::dto::PreflightResponse,
        crate::web::dto::AuthorInfo,
        crate::web::dto::PaginationMeta,
    )),
    tags(
        (name = "posts", description = "Post management"),
        (name = "comments", description = "Comment moderation"),
        (name = "contacts", description = "Contact inbox"),
        (name = "users", description = "User management"),
        (name = "files", description = "File manager and bulk operations"),
    )
)]
pub struct ApiDoc;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let post_routes = Router::new()
        .route("/", get(handlers::list_posts).post(handlers::create_post))
        .route(
            "/:id",
            get(handlers::get_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .route("/:id/publish", post(handlers::publish_post))
        .route("/:id/archive", post(handlers::archive_post));

    let comment_routes = Router::new()
        .route(
            "/",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route("/:id", axum::routing::delete(handlers::delete_comment))
        .route("/:id/status", put(handlers::update_comment_status));

    let contact_routes = Router::new()
        .route(
            "/",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route("/:id", axum::routing::delete(handlers::delete_contact))
        .route("/:id/read", put(handlers::mark_contact_read));

    let user_routes = Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        );

    let file_routes = Router::new()
        .route("/", get(handlers::list_files).post(handlers::upload_file))
        .route(
            "/:id",
            get(handlers::get_file).delete(handlers::delete_file),
        )
        .route("/:id/download", get(handlers::download_file))
        .route("/operations", post(handlers::run_file_operation))
        .route(
            "/operations/preflight",
            post(handlers::preflight_file_operation),
        )
        // The handler enforces the configured size cap; axum's default
        // 2MB body limit would reject uploads before it gets the chance
        .layer(DefaultBodyLimit::max(256 * 1024 * 1024));

    let api_routes = Router::new()
        .nest("/posts", post_routes)
        .nest("/comments", comment_routes)
        .nest("/contacts", contact_routes)
        .nest("/users", user_routes)
        .nest("/files", file_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the swagger UI router.
pub fn create_swagger_router() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        assert!(!doc.paths.paths.is_empty());
    }
}
