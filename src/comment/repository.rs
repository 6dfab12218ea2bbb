//! Comment repository for quillboard.

use super::types::{Comment, CommentStatus, NewComment};
use crate::db::DbPool;
use crate::{datetime, QuillError, Result};

/// Repository for comment CRUD and moderation operations.
pub struct CommentRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new comment.
    pub async fn create(&self, new_comment: &NewComment) -> Result<Comment> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO comments (post_id, author_name, author_email, body, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(new_comment.post_id)
        .bind(&new_comment.author_name)
        .bind(&new_comment.author_email)
        .bind(&new_comment.body)
        .bind(new_comment.status.as_str())
        .bind(datetime::now_rfc3339())
        .fetch_one(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| QuillError::NotFound("comment".to_string()))
    }

    /// Get a comment by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let result: Option<CommentRow> = sqlx::query_as(
            "SELECT id, post_id, author_name, author_email, body, status, created_at
             FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_comment()))
    }

    /// List comments on a post, oldest first.
    pub async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            "SELECT id, post_id, author_name, author_email, body, status, created_at
             FROM comments WHERE post_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(post_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_comment()).collect())
    }

    /// List comments with the given moderation status, newest first.
    pub async fn list_by_status(&self, status: CommentStatus) -> Result<Vec<Comment>> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            "SELECT id, post_id, author_name, author_email, body, status, created_at
             FROM comments WHERE status = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(status.as_str())
        .fetch_all(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_comment()).collect())
    }

    /// Change the moderation status of a comment.
    ///
    /// Returns the updated comment, or None if not found.
    pub async fn set_status(&self, id: i64, status: CommentStatus) -> Result<Option<Comment>> {
        let result = sqlx::query("UPDATE comments SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a comment by ID.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count comments awaiting moderation.
    pub async fn count_pending(&self) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM comments WHERE status = 'pending'")
                .fetch_one(self.pool)
                .await
                .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(count.0)
    }
}

/// Internal struct for mapping database rows to Comment.
#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    author_name: String,
    author_email: String,
    body: String,
    status: String,
    created_at: String,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            post_id: self.post_id,
            author_name: self.author_name,
            author_email: self.author_email,
            body: self.body,
            status: self.status.parse().unwrap_or(CommentStatus::Pending),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::post::{NewPost, PostRepository};
    use crate::Database;

    async fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let author = UserRepository::new(db.pool())
            .create(&NewUser::new("author", "Author"))
            .await
            .unwrap();
        let post = PostRepository::new(db.pool())
            .create(&NewPost::new("Post", "Body", author.id), "post")
            .await
            .unwrap();
        (db, post.id)
    }

    #[tokio::test]
    async fn test_create_and_list_by_post() {
        let (db, post_id) = setup().await;
        let repo = CommentRepository::new(db.pool());

        repo.create(&NewComment::new(post_id, "Ann", "ann@example.com", "First"))
            .await
            .unwrap();
        repo.create(&NewComment::new(post_id, "Bob", "bob@example.com", "Second"))
            .await
            .unwrap();

        let comments = repo.list_by_post(post_id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].body, "First");
    }

    #[tokio::test]
    async fn test_moderation_flow() {
        let (db, post_id) = setup().await;
        let repo = CommentRepository::new(db.pool());

        let comment = repo
            .create(&NewComment::new(post_id, "Ann", "ann@example.com", "Hmm"))
            .await
            .unwrap();
        assert_eq!(comment.status, CommentStatus::Pending);
        assert_eq!(repo.count_pending().await.unwrap(), 1);

        let approved = repo
            .set_status(comment.id, CommentStatus::Approved)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, CommentStatus::Approved);
        assert_eq!(repo.count_pending().await.unwrap(), 0);

        let spam = repo.list_by_status(CommentStatus::Spam).await.unwrap();
        assert!(spam.is_empty());
    }

    #[tokio::test]
    async fn test_set_status_missing() {
        let (db, _) = setup().await;
        let repo = CommentRepository::new(db.pool());

        let result = repo.set_status(999, CommentStatus::Approved).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let (db, post_id) = setup().await;
        let repo = CommentRepository::new(db.pool());

        let comment = repo
            .create(&NewComment::new(post_id, "Ann", "ann@example.com", "Bye"))
            .await
            .unwrap();

        assert!(repo.delete(comment.id).await.unwrap());
        assert!(!repo.delete(comment.id).await.unwrap());
    }
}
