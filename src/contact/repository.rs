//! Contact message repository for quillboard.

use super::types::{ContactMessage, NewContactMessage};
use crate::db::{DbPool, SQL_TRUE};
use crate::{datetime, QuillError, Result};

/// Repository for contact inbox operations.
pub struct ContactRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new ContactRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Store a new contact message.
    pub async fn create(&self, new_message: &NewContactMessage) -> Result<ContactMessage> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO contacts (name, email, subject, body, created_at)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&new_message.name)
        .bind(&new_message.email)
        .bind(&new_message.subject)
        .bind(&new_message.body)
        .bind(datetime::now_rfc3339())
        .fetch_one(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| QuillError::NotFound("contact message".to_string()))
    }

    /// Get a contact message by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<ContactMessage>> {
        let result: Option<ContactRow> = sqlx::query_as(
            "SELECT id, name, email, subject, body, is_read, created_at
             FROM contacts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_message()))
    }

    /// List all contact messages, newest first.
    pub async fn list_all(&self) -> Result<Vec<ContactMessage>> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            "SELECT id, name, email, subject, body, is_read, created_at
             FROM contacts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_message()).collect())
    }

    /// List unread contact messages, newest first.
    pub async fn list_unread(&self) -> Result<Vec<ContactMessage>> {
        let query = format!(
            "SELECT id, name, email, subject, body, is_read, created_at
             FROM contacts WHERE is_read != {} ORDER BY created_at DESC, id DESC",
            SQL_TRUE
        );
        let rows: Vec<ContactRow> = sqlx::query_as(&query)
            .fetch_all(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_message()).collect())
    }

    /// Mark a message as read.
    ///
    /// Returns the updated message, or None if not found.
    pub async fn mark_read(&self, id: i64) -> Result<Option<ContactMessage>> {
        let query = format!("UPDATE contacts SET is_read = {} WHERE id = $1", SQL_TRUE);
        let result = sqlx::query(&query)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a contact message by ID.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Internal struct for mapping database rows to ContactMessage.
#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    name: String,
    email: String,
    subject: String,
    body: String,
    is_read: bool,
    created_at: String,
}

impl ContactRow {
    fn into_message(self) -> ContactMessage {
        ContactMessage {
            id: self.id,
            name: self.name,
            email: self.email,
            subject: self.subject,
            body: self.body,
            is_read: self.is_read,
            created_at: self.created_at,
        }
    }
}
