//! User repository for quillboard.

use sqlx::QueryBuilder;

use super::user::{NewUser, Role, User, UserUpdate};
use crate::db::{Db, DbPool, SQL_TRUE};
use crate::{datetime, QuillError, Result};

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, email, display_name, role, created_at)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.display_name)
        .bind(new_user.role.as_str())
        .bind(datetime::now_rfc3339())
        .fetch_one(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| QuillError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, email, display_name, role, is_active, created_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_user()))
    }

    /// Get a user by username.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let result: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, email, display_name, role, is_active, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_user()))
    }

    /// Update a user by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated user, or None if not found.
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<Option<User>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<Db> = QueryBuilder::new("UPDATE users SET ");
        let mut separated = query.separated(", ");

        if let Some(ref display_name) = update.display_name {
            separated.push("display_name = ");
            separated.push_bind_unseparated(display_name);
        }
        if let Some(ref email) = update.email {
            separated.push("email = ");
            separated.push_bind_unseparated(email.clone());
        }
        if let Some(role) = update.role {
            separated.push("role = ");
            separated.push_bind_unseparated(role.as_str().to_string());
        }
        if let Some(is_active) = update.is_active {
            separated.push("is_active = ");
            separated.push_bind_unseparated(is_active);
        }

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

    /// Delete a user by ID.
    ///
    /// Returns true if a user was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// List all users, ordered by creation time.
    pub async fn list_all(&self) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT id, username, email, display_name, role, is_active, created_at
             FROM users ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_user()).collect())
    }

    /// List active users only.
    pub async fn list_active(&self) -> Result<Vec<User>> {
        let query = format!(
            "SELECT id, username, email, display_name, role, is_active, created_at
             FROM users WHERE is_active = {} ORDER BY created_at ASC, id ASC",
            SQL_TRUE
        );
        let rows: Vec<UserRow> = sqlx::query_as(&query)
            .fetch_all(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_user()).collect())
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// Check if a username is already taken.
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(self.pool)
                .await
                .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(exists.0)
    }
}

/// Internal struct for mapping database rows to User.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: Option<String>,
    display_name: String,
    role: String,
    is_active: bool,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            display_name: self.display_name,
            role: self.role.parse().unwrap_or(Role::Author),
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}
