//! File manager handlers for the admin API.

use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::header,
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::file::{
    DetectedType, FileCategory, FileStore, ManagedFileRepository, NewManagedFile,
    MAX_FILENAME_LENGTH,
};
use crate::web::dto::{
    ApiResponse, FileFilterQuery, FileOperationRequest, FileResponse, OperationResponse,
    PreflightResponse,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Generate a safe Content-Disposition header value for downloads.
///
/// Strips control characters to block header injection and falls back to
/// RFC 5987 encoding for non-ASCII names.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && sanitized == filename {
        return format!("attachment; filename=\"{filename}\"");
    }

    let encoded = urlencoding::encode(filename);
    format!("attachment; filename=\"{sanitized}\"; filename*=UTF-8''{encoded}")
}

fn parse_category(value: &str) -> Result<FileCategory, ApiError> {
    value.parse().map_err(|e: String| ApiError::bad_request(e))
}

/// GET /api/files - List managed files, optionally by category.
#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    params(FileFilterQuery),
    responses(
        (status = 200, description = "List of managed files", body = Vec<FileResponse>)
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<FileFilterQuery>,
) -> Result<Json<ApiResponse<Vec<FileResponse>>>, ApiError> {
    let repo = ManagedFileRepository::new(state.db.pool());

    let files = match filter.category.as_deref() {
        Some(category) => repo.list_by_category(parse_category(category)?).await,
        None => repo.list_all().await,
    }
    .map_err(|e| {
        tracing::error!("Failed to list files: {}", e);
        ApiError::internal("Failed to list files")
    })?;

    let responses = files.into_iter().map(FileResponse::from).collect();
    Ok(Json(ApiResponse::new(responses)))
}

/// POST /api/files - Upload a file.
///
/// Request body: multipart/form-data with "file" and "category" fields.
#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    responses(
        (status = 200, description = "File uploaded", body = FileResponse),
        (status = 400, description = "Invalid input or file too large"),
        (status = 422, description = "File type not allowed in category")
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    let mut filename: Option<String> = None;
    let mut category: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                filename = field.file_name().map(|s| s.to_string());
                content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| {
                            tracing::error!("Failed to read file content: {}", e);
                            ApiError::bad_request("Failed to read file")
                        })?
                        .to_vec(),
                );
            }
            "category" => {
                category = Some(field.text().await.map_err(|e| {
                    tracing::error!("Failed to read category: {}", e);
                    ApiError::bad_request("Invalid category field")
                })?);
            }
            _ => {}
        }
    }

    let filename = filename.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    let content = content.ok_or_else(|| ApiError::bad_request("No file content"))?;
    let category = parse_category(
        category
            .as_deref()
            .ok_or_else(|| ApiError::bad_request("No category provided"))?,
    )?;

    if filename.chars().count() > MAX_FILENAME_LENGTH {
        return Err(ApiError::bad_request("Filename too long"));
    }

    if content.len() as u64 > state.max_upload_size {
        let max_mb = state.max_upload_size / 1024 / 1024;
        return Err(ApiError::bad_request(format!(
            "File too large (max {max_mb}MB)"
        )));
    }

    // Uploads obey the same category rules as moves; archived is the one
    // exception and accepts anything (it is where junk goes to wait)
    let detected = DetectedType::from_name(&filename);
    if category != FileCategory::Archived {
        let check = crate::file::check_category(category, detected, &filename);
        if !check.is_valid {
            return Err(ApiError::unprocessable(
                check.reason.unwrap_or_else(|| "File type not allowed".to_string()),
            ));
        }
    }

    let stored_name = state.store.save(&content, category, &filename).map_err(|e| {
        tracing::error!("Failed to save file: {}", e);
        ApiError::internal("Failed to save file")
    })?;

    let repo = ManagedFileRepository::new(state.db.pool());
    let new_file = NewManagedFile::new(
        FileStore::public_url(category, &stored_name),
        &filename,
        &stored_name,
        detected.kind(),
        category,
        content.len() as i64,
    );

    let file = match repo.create(&new_file).await {
        Ok(file) => file,
        Err(e) => {
            tracing::error!("Failed to create file metadata: {}", e);
            // Clean up the stored bytes
            let _ = state.store.delete(category, &stored_name);
            return Err(ApiError::internal("Failed to create file"));
        }
    };

    Ok(Json(ApiResponse::new(FileResponse::from(file))))
}

/// GET /api/files/:id - Get file metadata.
#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "files",
    params(("id" = i64, Path, description = "File ID")),
    responses(
        (status = 200, description = "File metadata", body = FileResponse),
        (status = 404, description = "File not found")
    )
)]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<i64>,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    let file = ManagedFileRepository::new(state.db.pool())
        .get_by_id(file_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get file: {}", e);
            ApiError::internal("Failed to get file")
        })?
        .ok_or_else(|| ApiError::not_found("File not found"))?;

    Ok(Json(ApiResponse::new(FileResponse::from(file))))
}

/// GET /api/files/:id/download - Download a file.
#[utoipa::path(
    get,
    path = "/files/{id}/download",
    tag = "files",
    params(("id" = i64, Path, description = "File ID")),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 404, description = "File not found")
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<i64>,
) -> Result<Response<Body>, ApiError> {
    let file = ManagedFileRepository::new(state.db.pool())
        .get_by_id(file_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get file: {}", e);
            ApiError::internal("Failed to get file")
        })?
        .ok_or_else(|| ApiError::not_found("File not found"))?;

    let content = state.store.load(file.category, &file.stored_name).map_err(|e| {
        tracing::error!("Failed to load file: {}", e);
        ApiError::internal("Failed to load file")
    })?;

    let content_type = mime_guess::from_path(&file.original_name)
        .first_or_octet_stream()
        .to_string();

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&file.original_name),
        )
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}

/// DELETE /api/files/:id - Delete a single file.
#[utoipa::path(
    delete,
    path = "/files/{id}",
    tag = "files",
    params(("id" = i64, Path, description = "File ID")),
    responses(
        (status = 200, description = "File deleted"),
        (status = 404, description = "File not found")
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let repo = ManagedFileRepository::new(state.db.pool());

    let file = repo
        .get_by_id(file_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get file: {}", e);
            ApiError::internal("Failed to get file")
        })?
        .ok_or_else(|| ApiError::not_found("File not found"))?;

    let _ = state.store.delete(file.category, &file.stored_name);

    repo.delete(file_id).await.map_err(|e| {
        tracing::error!("Failed to delete file metadata: {}", e);
        ApiError::internal("Failed to delete file")
    })?;

    Ok(Json(ApiResponse::new(())))
}

/// POST /api/files/operations - Run a bulk file operation.
///
/// The batch is best-effort: each file succeeds or fails on its own and
/// the response carries per-file errors.
#[utoipa::path(
    post,
    path = "/files/operations",
    tag = "files",
    request_body = FileOperationRequest,
    responses(
        (status = 200, description = "Operation summary", body = OperationResponse),
        (status = 400, description = "Unknown operation or missing options")
    )
)]
pub async fn run_file_operation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FileOperationRequest>,
) -> Result<Json<OperationResponse>, ApiError> {
    let operation = request.to_operation().map_err(ApiError::bad_request)?;

    let executor = crate::file::BatchExecutor::new(state.db.pool(), &state.store);
    let outcome = executor
        .execute(&operation, &request.files)
        .await
        .map_err(|e| {
            tracing::error!("Bulk operation failed: {}", e);
            ApiError::internal("Bulk operation failed")
        })?;

    Ok(Json(OperationResponse::from(outcome)))
}

/// POST /api/files/operations/preflight - Validate a bulk operation.
///
/// Reports per-file validity and safety warnings without touching
/// anything, so the UI can ask for confirmation.
#[utoipa::path(
    post,
    path = "/files/operations/preflight",
    tag = "files",
    request_body = FileOperationRequest,
    responses(
        (status = 200, description = "Per-file validity and warnings", body = Vec<PreflightResponse>),
        (status = 400, description = "Unknown operation or missing options")
    )
)]
pub async fn preflight_file_operation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FileOperationRequest>,
) -> Result<Json<ApiResponse<Vec<PreflightResponse>>>, ApiError> {
    let operation = request.to_operation().map_err(ApiError::bad_request)?;

    let executor = crate::file::BatchExecutor::new(state.db.pool(), &state.store);
    let entries = executor
        .preflight(&operation, &request.files)
        .await
        .map_err(|e| {
            tracing::error!("Preflight failed: {}", e);
            ApiError::internal("Preflight failed")
        })?;

    let responses = entries.into_iter().map(PreflightResponse::from).collect();
    Ok(Json(ApiResponse::new(responses)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_simple_ascii() {
        let result = content_disposition_header("document.txt");
        assert_eq!(result, "attachment; filename=\"document.txt\"");
    }

    #[test]
    fn test_content_disposition_with_spaces() {
        let result = content_disposition_header("my document.txt");
        assert_eq!(result, "attachment; filename=\"my document.txt\"");
    }

    #[test]
    fn test_content_disposition_non_ascii() {
        let result = content_disposition_header("résumé.pdf");
        assert!(result.starts_with("attachment; filename=\""));
        assert!(result.contains("filename*=UTF-8''"));
    }

    #[test]
    fn test_content_disposition_quote_sanitized() {
        let result = content_disposition_header("test\"file.txt");
        assert!(result.contains("filename=\"test_file.txt\""));
        assert!(result.contains("filename*=UTF-8''"));
    }

    #[test]
    fn test_content_disposition_header_injection() {
        let result = content_disposition_header("test\r\nX-Injected: bad.txt");
        assert!(!result.contains('\r'));
        assert!(!result.contains('\n'));
        assert!(result.starts_with("attachment; filename="));
    }
}
