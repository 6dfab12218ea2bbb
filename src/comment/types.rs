//! Comment model types.

use std::fmt;
use std::str::FromStr;

/// Moderation status of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentStatus {
    /// Awaiting moderation.
    #[default]
    Pending,
    /// Visible on the public site.
    Approved,
    /// Marked as spam.
    Spam,
}

impl CommentStatus {
    /// Convert status to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStatus::Pending => "pending",
            CommentStatus::Approved => "approved",
            CommentStatus::Spam => "spam",
        }
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CommentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(CommentStatus::Pending),
            "approved" => Ok(CommentStatus::Approved),
            "spam" => Ok(CommentStatus::Spam),
            _ => Err(format!("unknown comment status: {s}")),
        }
    }
}

/// Comment entity.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// Post this comment belongs to.
    pub post_id: i64,
    /// Commenter display name.
    pub author_name: String,
    /// Commenter email.
    pub author_email: String,
    /// Comment body.
    pub body: String,
    /// Moderation status.
    pub status: CommentStatus,
    /// Creation timestamp.
    pub created_at: String,
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Post this comment belongs to.
    pub post_id: i64,
    /// Commenter display name.
    pub author_name: String,
    /// Commenter email.
    pub author_email: String,
    /// Comment body.
    pub body: String,
    /// Initial status (defaults to Pending).
    pub status: CommentStatus,
}

impl NewComment {
    /// Create a new comment with required fields.
    pub fn new(
        post_id: i64,
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            post_id,
            author_name: author_name.into(),
            author_email: author_email.into(),
            body: body.into(),
            status: CommentStatus::Pending,
        }
    }

    /// Set the initial status.
    pub fn with_status(mut self, status: CommentStatus) -> Self {
        self.status = status;
        self
    }
}
