//! Post model types for quillboard.

use std::fmt;
use std::str::FromStr;

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostStatus {
    /// Not yet visible.
    #[default]
    Draft,
    /// Publicly visible.
    Published,
    /// Removed from the public site but kept in the database.
    Archived,
}

impl PostStatus {
    /// Convert status to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            _ => Err(format!("unknown post status: {s}")),
        }
    }
}

/// Post entity.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// URL slug (unique).
    pub slug: String,
    /// Post body (markdown).
    pub body: String,
    /// Short summary shown in listings (optional).
    pub excerpt: Option<String>,
    /// Publication status.
    pub status: PostStatus,
    /// Author user ID.
    pub author_id: i64,
    /// Cover image URL (optional).
    pub cover_image_url: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Publication timestamp (set on first publish).
    pub published_at: Option<String>,
}

impl Post {
    /// Check whether the post is publicly visible.
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Author user ID.
    pub author_id: i64,
    /// Excerpt (optional).
    pub excerpt: Option<String>,
    /// Cover image URL (optional).
    pub cover_image_url: Option<String>,
    /// Initial status (defaults to Draft).
    pub status: PostStatus,
}

impl NewPost {
    /// Create a new post with minimal required fields.
    pub fn new(title: impl Into<String>, body: impl Into<String>, author_id: i64) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            author_id,
            excerpt: None,
            cover_image_url: None,
            status: PostStatus::Draft,
        }
    }

    /// Set the excerpt.
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Set the cover image URL.
    pub fn with_cover_image(mut self, url: impl Into<String>) -> Self {
        self.cover_image_url = Some(url.into());
        self
    }

    /// Set the initial status.
    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }
}

/// Data for updating an existing post.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub body: Option<String>,
    /// New excerpt (Some(None) clears it).
    pub excerpt: Option<Option<String>>,
    /// New cover image URL (Some(None) clears it).
    pub cover_image_url: Option<Option<String>>,
    /// New status.
    pub status: Option<PostStatus>,
}

impl PostUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set new body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set new excerpt.
    pub fn excerpt(mut self, excerpt: Option<String>) -> Self {
        self.excerpt = Some(excerpt);
        self
    }

    /// Set new cover image URL.
    pub fn cover_image_url(mut self, url: Option<String>) -> Self {
        self.cover_image_url = Some(url);
        self
    }

    /// Set new status.
    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.excerpt.is_none()
            && self.cover_image_url.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [PostStatus::Draft, PostStatus::Published, PostStatus::Archived] {
            assert_eq!(status.as_str().parse::<PostStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_from_str_unknown() {
        assert!("pending".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_new_post_builder() {
        let post = NewPost::new("Hello", "Body text", 1)
            .with_excerpt("A greeting")
            .with_status(PostStatus::Published);

        assert_eq!(post.title, "Hello");
        assert_eq!(post.excerpt, Some("A greeting".to_string()));
        assert_eq!(post.status, PostStatus::Published);
        assert!(post.cover_image_url.is_none());
    }

    #[test]
    fn test_post_update_is_empty() {
        assert!(PostUpdate::new().is_empty());
        assert!(!PostUpdate::new().title("New").is_empty());
        assert!(!PostUpdate::new().excerpt(None).is_empty());
    }
}
