//! Request DTOs for the admin API.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::file::{CleanupSpec, FileCategory, FileOperation, OperationKind};

/// Pagination query parameters.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PaginationQuery {
    /// Convert to a (offset, limit) pair with sane bounds.
    pub fn to_offset_limit(&self) -> (i64, i64) {
        let per_page = self.per_page.clamp(1, 100) as i64;
        let page = self.page.max(1) as i64;
        ((page - 1) * per_page, per_page)
    }
}

/// Post creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    /// Post title.
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    /// Post body.
    pub body: String,
    /// Author user ID.
    pub author_id: i64,
    /// Excerpt (optional).
    #[validate(length(max = 500, message = "excerpt must be at most 500 characters"))]
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Cover image URL (optional).
    #[serde(default)]
    pub cover_image_url: Option<String>,
    /// Initial status (draft when omitted).
    #[serde(default)]
    pub status: Option<String>,
}

/// Post update request.
///
/// Omitted fields are left unchanged; an empty string clears an optional
/// field.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    /// New title.
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    #[serde(default)]
    pub title: Option<String>,
    /// New body.
    #[serde(default)]
    pub body: Option<String>,
    /// New excerpt.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// New cover image URL.
    #[serde(default)]
    pub cover_image_url: Option<String>,
    /// New status.
    #[serde(default)]
    pub status: Option<String>,
}

/// Post listing filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostFilterQuery {
    /// Filter by status (draft, published, archived).
    #[serde(default)]
    pub status: Option<String>,
}

/// Comment creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    /// Post the comment belongs to.
    pub post_id: i64,
    /// Commenter display name.
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub author_name: String,
    /// Commenter email.
    #[validate(email(message = "invalid email address"))]
    pub author_email: String,
    /// Comment body.
    #[validate(length(min = 1, max = 4000, message = "comment must be 1-4000 characters"))]
    pub body: String,
}

/// Comment moderation request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCommentStatusRequest {
    /// New status (pending, approved, spam).
    pub status: String,
}

/// Comment listing filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommentFilterQuery {
    /// Filter by post.
    #[serde(default)]
    pub post_id: Option<i64>,
    /// Filter by moderation status.
    #[serde(default)]
    pub status: Option<String>,
}

/// Contact form submission.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateContactRequest {
    /// Sender name.
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    /// Sender email.
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    /// Message subject.
    #[validate(length(min = 1, max = 200, message = "subject must be 1-200 characters"))]
    pub subject: String,
    /// Message body.
    #[validate(length(min = 1, max = 10000, message = "message must be 1-10000 characters"))]
    pub body: String,
}

/// Contact listing filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactFilterQuery {
    /// Only return unread messages.
    #[serde(default)]
    pub unread: bool,
}

/// User creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Login username.
    #[validate(length(min = 3, max = 32, message = "username must be 3-32 characters"))]
    pub username: String,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "display name must be 1-100 characters"))]
    pub display_name: String,
    /// Email (optional).
    #[validate(email(message = "invalid email address"))]
    #[serde(default)]
    pub email: Option<String>,
    /// Role (author when omitted).
    #[serde(default)]
    pub role: Option<String>,
}

/// User update request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name.
    #[validate(length(min = 1, max = 100, message = "display name must be 1-100 characters"))]
    #[serde(default)]
    pub display_name: Option<String>,
    /// New email; an empty string clears it.
    #[serde(default)]
    pub email: Option<String>,
    /// New role.
    #[serde(default)]
    pub role: Option<String>,
    /// New active status.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// File listing filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FileFilterQuery {
    /// Filter by category.
    #[serde(default)]
    pub category: Option<String>,
}

/// Bulk file operation request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FileOperationRequest {
    /// Operation kind (move, copy, delete, archive, cleanup).
    pub operation: String,
    /// File URLs the operation applies to (ignored by cleanup).
    #[serde(default)]
    pub files: Vec<String>,
    /// Operation options.
    #[serde(default)]
    pub options: OperationOptions,
}

/// Options attached to a bulk file operation.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OperationOptions {
    /// Target category for move/copy.
    #[serde(default)]
    pub new_category: Option<String>,
    /// Age threshold in days for cleanup.
    #[serde(default)]
    pub max_age_days: Option<i64>,
    /// Size threshold in megabytes for cleanup.
    #[serde(default)]
    pub max_size_mb: Option<i64>,
    /// Delete files over the age threshold.
    #[serde(default)]
    pub delete_old: bool,
    /// Delete files over the size threshold.
    #[serde(default)]
    pub delete_large: bool,
}

impl FileOperationRequest {
    /// Parse the loose wire shape into a typed operation.
    pub fn to_operation(&self) -> Result<FileOperation, String> {
        let kind: OperationKind = self.operation.parse()?;

        match kind {
            OperationKind::Move => {
                let category = self.parse_new_category()?;
                Ok(FileOperation::Move {
                    new_category: category,
                })
            }
            OperationKind::Copy => {
                let category = self.parse_new_category()?;
                Ok(FileOperation::Copy {
                    new_category: category,
                })
            }
            OperationKind::Delete => Ok(FileOperation::Delete),
            OperationKind::Archive => Ok(FileOperation::Archive),
            OperationKind::Cleanup => {
                let defaults = CleanupSpec::default();
                Ok(FileOperation::Cleanup(CleanupSpec {
                    max_age_days: self.options.max_age_days.unwrap_or(defaults.max_age_days),
                    max_size_bytes: self
                        .options
                        .max_size_mb
                        .map(|mb| mb * 1024 * 1024)
                        .unwrap_or(defaults.max_size_bytes),
                    delete_old: self.options.delete_old,
                    delete_large: self.options.delete_large,
                }))
            }
        }
    }

    fn parse_new_category(&self) -> Result<FileCategory, String> {
        self.options
            .new_category
            .as_deref()
            .ok_or_else(|| format!("{} requires options.new_category", self.operation))?
            .parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offset_limit() {
        let query = PaginationQuery {
            page: 3,
            per_page: 10,
        };
        assert_eq!(query.to_offset_limit(), (20, 10));
    }

    #[test]
    fn test_pagination_bounds() {
        let query = PaginationQuery {
            page: 0,
            per_page: 1000,
        };
        assert_eq!(query.to_offset_limit(), (0, 100));
    }

    #[test]
    fn test_operation_request_move() {
        let request = FileOperationRequest {
            operation: "move".to_string(),
            files: vec!["/uploads/images/a.png".to_string()],
            options: OperationOptions {
                new_category: Some("cover-images".to_string()),
                ..OperationOptions::default()
            },
        };

        assert_eq!(
            request.to_operation().unwrap(),
            FileOperation::Move {
                new_category: FileCategory::CoverImages
            }
        );
    }

    #[test]
    fn test_operation_request_move_without_category() {
        let request = FileOperationRequest {
            operation: "move".to_string(),
            files: vec![],
            options: OperationOptions::default(),
        };

        assert!(request.to_operation().is_err());
    }

    #[test]
    fn test_operation_request_unknown_kind() {
        let request = FileOperationRequest {
            operation: "shred".to_string(),
            files: vec![],
            options: OperationOptions::default(),
        };

        assert!(request.to_operation().is_err());
    }

    #[test]
    fn test_operation_request_cleanup_options() {
        let request = FileOperationRequest {
            operation: "cleanup".to_string(),
            files: vec![],
            options: OperationOptions {
                max_age_days: Some(30),
                max_size_mb: Some(10),
                delete_old: true,
                delete_large: true,
                ..OperationOptions::default()
            },
        };

        match request.to_operation().unwrap() {
            FileOperation::Cleanup(spec) => {
                assert_eq!(spec.max_age_days, 30);
                assert_eq!(spec.max_size_bytes, 10 * 1024 * 1024);
                assert!(spec.delete_old);
                assert!(spec.delete_large);
            }
            other => panic!("expected cleanup, got {other:?}"),
        }
    }

    #[test]
    fn test_operation_request_cleanup_defaults() {
        let request = FileOperationRequest {
            operation: "cleanup".to_string(),
            files: vec![],
            options: OperationOptions::default(),
        };

        match request.to_operation().unwrap() {
            FileOperation::Cleanup(spec) => {
                assert_eq!(spec.max_age_days, 365);
                assert!(!spec.delete_old);
                assert!(!spec.delete_large);
            }
            other => panic!("expected cleanup, got {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = serde_json::json!({
            "operation": "delete",
            "files": ["/uploads/images/a.png", "/uploads/images/b.png"]
        });

        let request: FileOperationRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.files.len(), 2);
        assert_eq!(request.to_operation().unwrap(), FileOperation::Delete);
    }
}
