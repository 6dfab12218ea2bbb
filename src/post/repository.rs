//! Post repository for quillboard.

use sqlx::QueryBuilder;

use super::types::{NewPost, Post, PostStatus, PostUpdate};
use crate::db::{Db, DbPool};
use crate::{datetime, QuillError, Result};

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post with the given slug.
    ///
    /// The slug must already be unique; uniqueness is resolved by the
    /// service layer before this call.
    pub async fn create(&self, new_post: &NewPost, slug: &str) -> Result<Post> {
        let now = datetime::now_rfc3339();
        let published_at = if new_post.status == PostStatus::Published {
            Some(now.clone())
        } else {
            None
        };

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (title, slug, body, excerpt, status, author_id,
                                cover_image_url, created_at, updated_at, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id",
        )
        .bind(&new_post.title)
        .bind(slug)
        .bind(&new_post.body)
        .bind(&new_post.excerpt)
        .bind(new_post.status.as_str())
        .bind(new_post.author_id)
        .bind(&new_post.cover_image_url)
        .bind(&now)
        .bind(&now)
        .bind(&published_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| QuillError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let result: Option<PostRow> = sqlx::query_as(
            "SELECT id, title, slug, body, excerpt, status, author_id,
                    cover_image_url, created_at, updated_at, published_at
             FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_post()))
    }

    /// Get a post by slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let result: Option<PostRow> = sqlx::query_as(
            "SELECT id, title, slug, body, excerpt, status, author_id,
                    cover_image_url, created_at, updated_at, published_at
             FROM posts WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_post()))
    }

    /// Update a post by ID.
    ///
    /// Only fields that are set in the update will be modified; updated_at
    /// is always refreshed. A transition to Published sets published_at if
    /// it was never set. Returns the updated post, or None if not found.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let existing = match self.get_by_id(id).await? {
            Some(post) => post,
            None => return Ok(None),
        };

        let now = datetime::now_rfc3339();

        let mut query: QueryBuilder<Db> = QueryBuilder::new("UPDATE posts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref title) = update.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title);
        }
        if let Some(ref body) = update.body {
            separated.push("body = ");
            separated.push_bind_unseparated(body);
        }
        if let Some(ref excerpt) = update.excerpt {
            separated.push("excerpt = ");
            separated.push_bind_unseparated(excerpt.clone());
        }
        if let Some(ref cover) = update.cover_image_url {
            separated.push("cover_image_url = ");
            separated.push_bind_unseparated(cover.clone());
        }
        if let Some(status) = update.status {
            separated.push("status = ");
            separated.push_bind_unseparated(status.as_str().to_string());

            if status == PostStatus::Published && existing.published_at.is_none() {
                separated.push("published_at = ");
                separated.push_bind_unseparated(now.clone());
            }
        }

        separated.push("updated_at = ");
        separated.push_bind_unseparated(now.clone());

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a post by ID.
    ///
    /// Comments cascade via the schema. Returns true if a post was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// List a page of posts, newest first.
    pub async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Post>> {
        let rows: Vec<PostRow> = sqlx::query_as(
            "SELECT id, title, slug, body, excerpt, status, author_id,
                    cover_image_url, created_at, updated_at, published_at
             FROM posts ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_post()).collect())
    }

    /// List all posts with the given status, newest first.
    pub async fn list_by_status(&self, status: PostStatus) -> Result<Vec<Post>> {
        let rows: Vec<PostRow> = sqlx::query_as(
            "SELECT id, title, slug, body, excerpt, status, author_id,
                    cover_image_url, created_at, updated_at, published_at
             FROM posts WHERE status = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(status.as_str())
        .fetch_all(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_post()).collect())
    }

    /// Count all posts.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// Check if a slug is already taken.
    pub async fn slug_exists(&self, slug: &str) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM posts WHERE slug = $1)")
            .bind(slug)
            .fetch_one(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(exists.0)
    }
}

/// Internal struct for mapping database rows to Post.
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    slug: String,
    body: String,
    excerpt: Option<String>,
    status: String,
    author_id: i64,
    cover_image_url: Option<String>,
    created_at: String,
    updated_at: String,
    published_at: Option<String>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            slug: self.slug,
            body: self.body,
            excerpt: self.excerpt,
            status: self.status.parse().unwrap_or(PostStatus::Draft),
            author_id: self.author_id,
            cover_image_url: self.cover_image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
            published_at: self.published_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    async fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let author = UserRepository::new(db.pool())
            .create(&NewUser::new("author", "Author"))
            .await
            .unwrap();
        (db, author.id)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (db, author_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        let post = repo
            .create(&NewPost::new("Hello World", "First!", author_id), "hello-world")
            .await
            .unwrap();

        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.published_at.is_none());

        let by_slug = repo.get_by_slug("hello-world").await.unwrap().unwrap();
        assert_eq!(by_slug.id, post.id);
    }

    #[tokio::test]
    async fn test_create_published_sets_published_at() {
        let (db, author_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        let post = repo
            .create(
                &NewPost::new("Live", "Body", author_id).with_status(PostStatus::Published),
                "live",
            )
            .await
            .unwrap();

        assert!(post.published_at.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let (db, author_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        repo.create(&NewPost::new("One", "a", author_id), "same")
            .await
            .unwrap();
        let result = repo.create(&NewPost::new("Two", "b", author_id), "same").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_publish_transition() {
        let (db, author_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        let post = repo
            .create(&NewPost::new("Draft", "Body", author_id), "draft")
            .await
            .unwrap();

        let updated = repo
            .update(post.id, &PostUpdate::new().status(PostStatus::Published))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, PostStatus::Published);
        assert!(updated.published_at.is_some());

        // Archiving later keeps the original published_at
        let archived = repo
            .update(post.id, &PostUpdate::new().status(PostStatus::Archived))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(archived.published_at, updated.published_at);
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let (db, _) = setup().await;
        let repo = PostRepository::new(db.pool());

        let result = repo
            .update(999, &PostUpdate::new().title("X"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_cascades_comments() {
        let (db, author_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        let post = repo
            .create(&NewPost::new("With comments", "Body", author_id), "with-comments")
            .await
            .unwrap();

        sqlx::query(
            "INSERT INTO comments (post_id, author_name, author_email, body, status, created_at)
             VALUES ($1, 'Ann', 'ann@example.com', 'Nice', 'approved', $2)",
        )
        .bind(post.id)
        .bind(crate::datetime::now_rfc3339())
        .execute(db.pool())
        .await
        .unwrap();

        assert!(repo.delete(post.id).await.unwrap());

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_list_page_and_count() {
        let (db, author_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        for i in 0..5 {
            repo.create(
                &NewPost::new(format!("Post {i}"), "Body", author_id),
                &format!("post-{i}"),
            )
            .await
            .unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 5);

        let page = repo.list_page(0, 2).await.unwrap();
        assert_eq!(page.len(), 2);

        let rest = repo.list_page(4, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let (db, author_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        repo.create(&NewPost::new("Draft", "a", author_id), "d1")
            .await
            .unwrap();
        repo.create(
            &NewPost::new("Live", "b", author_id).with_status(PostStatus::Published),
            "p1",
        )
        .await
        .unwrap();

        let drafts = repo.list_by_status(PostStatus::Draft).await.unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].slug, "d1");
    }

    #[tokio::test]
    async fn test_slug_exists() {
        let (db, author_id) = setup().await;
        let repo = PostRepository::new(db.pool());

        assert!(!repo.slug_exists("hello").await.unwrap());
        repo.create(&NewPost::new("Hello", "Body", author_id), "hello")
            .await
            .unwrap();
        assert!(repo.slug_exists("hello").await.unwrap());
    }
}
