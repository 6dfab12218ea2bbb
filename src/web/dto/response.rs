//! Response DTOs for the admin API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::comment::Comment;
use crate::contact::ContactMessage;
use crate::db::User;
use crate::file::{FileError, ManagedFile, OperationOutcome, PreflightEntry};
use crate::post::Post;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
            },
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
}

/// Author information embedded in post responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Display name.
    pub display_name: String,
}

// ============================================================================
// Post DTOs
// ============================================================================

/// Post response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    /// Post ID.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Post body.
    pub body: String,
    /// Excerpt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Publication status.
    pub status: String,
    /// Author info.
    pub author: AuthorInfo,
    /// Cover image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Publication timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl PostResponse {
    /// Build a response from a post and its author.
    pub fn from_post(post: Post, author: AuthorInfo) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            body: post.body,
            excerpt: post.excerpt,
            status: post.status.to_string(),
            author,
            cover_image_url: post.cover_image_url,
            created_at: post.created_at,
            updated_at: post.updated_at,
            published_at: post.published_at,
        }
    }
}

// ============================================================================
// Comment DTOs
// ============================================================================

/// Comment response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    /// Comment ID.
    pub id: i64,
    /// Post ID.
    pub post_id: i64,
    /// Commenter name.
    pub author_name: String,
    /// Commenter email.
    pub author_email: String,
    /// Comment body.
    pub body: String,
    /// Moderation status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            author_name: comment.author_name,
            author_email: comment.author_email,
            body: comment.body,
            status: comment.status.to_string(),
            created_at: comment.created_at,
        }
    }
}

// ============================================================================
// Contact DTOs
// ============================================================================

/// Contact message response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    /// Message ID.
    pub id: i64,
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Subject.
    pub subject: String,
    /// Body.
    pub body: String,
    /// Whether the message has been read.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<ContactMessage> for ContactResponse {
    fn from(message: ContactMessage) -> Self {
        Self {
            id: message.id,
            name: message.name,
            email: message.email,
            subject: message.subject,
            body: message.body,
            is_read: message.is_read,
            created_at: message.created_at,
        }
    }
}

// ============================================================================
// User DTOs
// ============================================================================

/// User response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name.
    pub display_name: String,
    /// Role.
    pub role: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            role: user.role.to_string(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// File DTOs
// ============================================================================

/// Managed file response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileResponse {
    /// File ID.
    pub id: i64,
    /// Public URL.
    pub url: String,
    /// Original filename.
    pub original_name: String,
    /// Stored filename.
    pub stored_name: String,
    /// Coarse type (image or document).
    pub file_type: String,
    /// Storage category.
    pub category: String,
    /// Size in bytes.
    pub size: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Last category change timestamp.
    pub modified_at: String,
}

impl From<ManagedFile> for FileResponse {
    fn from(file: ManagedFile) -> Self {
        Self {
            id: file.id,
            url: file.url,
            original_name: file.original_name,
            stored_name: file.stored_name,
            file_type: file.file_type.to_string(),
            category: file.category.to_string(),
            size: file.size,
            created_at: file.created_at,
            modified_at: file.modified_at,
        }
    }
}

/// Per-file error in an operation response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileErrorResponse {
    /// File URL.
    pub file: String,
    /// Failure reason.
    pub reason: String,
}

impl From<FileError> for FileErrorResponse {
    fn from(error: FileError) -> Self {
        Self {
            file: error.file,
            reason: error.reason,
        }
    }
}

/// Batch counts in an operation response.
#[derive(Debug, Serialize, ToSchema)]
pub struct OperationSummary {
    /// Files processed successfully.
    pub successful: usize,
    /// Files that failed.
    pub failed: usize,
}

/// Bulk operation response.
#[derive(Debug, Serialize, ToSchema)]
pub struct OperationResponse {
    /// Whether every file succeeded.
    pub success: bool,
    /// Batch counts.
    pub summary: OperationSummary,
    /// Per-file failures.
    pub errors: Vec<FileErrorResponse>,
    /// Files removed by a cleanup sweep.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_files: Option<u64>,
    /// Bytes reclaimed by a cleanup sweep.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freed_space: Option<u64>,
}

impl From<OperationOutcome> for OperationResponse {
    fn from(outcome: OperationOutcome) -> Self {
        Self {
            success: outcome.summary.failed == 0,
            summary: OperationSummary {
                successful: outcome.summary.successful,
                failed: outcome.summary.failed,
            },
            errors: outcome.summary.errors.into_iter().map(Into::into).collect(),
            deleted_files: outcome.deleted_files,
            freed_space: outcome.freed_space,
        }
    }
}

/// Preflight entry response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PreflightResponse {
    /// File URL.
    pub file: String,
    /// Whether the operation would be allowed.
    pub is_valid: bool,
    /// Rejection reason when invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Safety warning when the file should be confirmed first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<PreflightEntry> for PreflightResponse {
    fn from(entry: PreflightEntry) -> Self {
        Self {
            file: entry.file,
            is_valid: entry.is_valid,
            reason: entry.reason,
            warning: entry.warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::BatchSummary;

    #[test]
    fn test_operation_response_success_flag() {
        let outcome = OperationOutcome {
            summary: BatchSummary {
                successful: 3,
                failed: 0,
                errors: vec![],
            },
            deleted_files: None,
            freed_space: None,
        };
        let response = OperationResponse::from(outcome);
        assert!(response.success);
        assert_eq!(response.summary.successful, 3);

        let outcome = OperationOutcome {
            summary: BatchSummary {
                successful: 2,
                failed: 1,
                errors: vec![FileError {
                    file: "/uploads/images/x.png".to_string(),
                    reason: "File not found".to_string(),
                }],
            },
            deleted_files: None,
            freed_space: None,
        };
        let response = OperationResponse::from(outcome);
        assert!(!response.success);
        assert_eq!(response.errors.len(), 1);
    }

    #[test]
    fn test_cleanup_fields_serialized_when_present() {
        let outcome = OperationOutcome {
            summary: BatchSummary::default(),
            deleted_files: Some(2),
            freed_space: Some(4096),
        };
        let json = serde_json::to_value(OperationResponse::from(outcome)).unwrap();
        assert_eq!(json["deleted_files"], 2);
        assert_eq!(json["freed_space"], 4096);

        let outcome = OperationOutcome::default();
        let json = serde_json::to_value(OperationResponse::from(outcome)).unwrap();
        assert!(json.get("deleted_files").is_none());
    }
}
