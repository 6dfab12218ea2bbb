//! Post service for quillboard.
//!
//! High-level post operations: validation, slug assignment, and status
//! transitions on top of the repository.

use super::repository::PostRepository;
use super::slug::{slug_candidate, slugify, MAX_SLUG_ATTEMPTS};
use super::types::{NewPost, Post, PostStatus, PostUpdate};
use super::{MAX_EXCERPT_LENGTH, MAX_TITLE_LENGTH};
use crate::db::DbPool;
use crate::{QuillError, Result};

/// Service for managing posts.
pub struct PostService<'a> {
    pool: &'a DbPool,
}

impl<'a> PostService<'a> {
    /// Create a new PostService.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a post, deriving a unique slug from the title.
    ///
    /// Slug uniqueness is resolved by sequential lookups with a bounded
    /// attempt count.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        validate_title(&new_post.title)?;
        validate_excerpt(new_post.excerpt.as_deref())?;

        let repo = PostRepository::new(self.pool);
        let base = slugify(&new_post.title);

        let mut slug = None;
        for attempt in 0..MAX_SLUG_ATTEMPTS {
            let candidate = slug_candidate(&base, attempt);
            if !repo.slug_exists(&candidate).await? {
                slug = Some(candidate);
                break;
            }
        }

        let slug = slug.ok_or_else(|| {
            QuillError::Validation(format!(
                "could not find a free slug for \"{base}\" after {MAX_SLUG_ATTEMPTS} attempts"
            ))
        })?;

        repo.create(new_post, &slug).await
    }

    /// Update a post's fields.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Post> {
        if let Some(ref title) = update.title {
            validate_title(title)?;
        }
        if let Some(ref excerpt) = update.excerpt {
            validate_excerpt(excerpt.as_deref())?;
        }

        PostRepository::new(self.pool)
            .update(id, update)
            .await?
            .ok_or_else(|| QuillError::NotFound("post".to_string()))
    }

    /// Publish a post.
    pub async fn publish(&self, id: i64) -> Result<Post> {
        self.update(id, &PostUpdate::new().status(PostStatus::Published))
            .await
    }

    /// Archive a post.
    pub async fn archive(&self, id: i64) -> Result<Post> {
        self.update(id, &PostUpdate::new().status(PostStatus::Archived))
            .await
    }

    /// Delete a post.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let deleted = PostRepository::new(self.pool).delete(id).await?;
        if !deleted {
            return Err(QuillError::NotFound("post".to_string()));
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(QuillError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(QuillError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_excerpt(excerpt: Option<&str>) -> Result<()> {
    if let Some(excerpt) = excerpt {
        if excerpt.chars().count() > MAX_EXCERPT_LENGTH {
            return Err(QuillError::Validation(format!(
                "excerpt must be at most {MAX_EXCERPT_LENGTH} characters"
            )));
        }
    }
    Ok(())
}
