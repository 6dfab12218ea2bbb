//! Managed file metadata for quillboard.

use super::category::{FileCategory, FileKind};
use crate::db::DbPool;
use crate::{datetime, QuillError, Result};

/// Metadata row for a managed file.
#[derive(Debug, Clone)]
pub struct ManagedFile {
    /// Unique file ID.
    pub id: i64,
    /// Stable public handle (`/uploads/{category}/{stored_name}`).
    pub url: String,
    /// Filename as uploaded.
    pub original_name: String,
    /// UUID-based name on disk.
    pub stored_name: String,
    /// Coarse kind (image or document).
    pub file_type: FileKind,
    /// Current storage category.
    pub category: FileCategory,
    /// Size in bytes.
    pub size: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Last category change or creation timestamp.
    pub modified_at: String,
}

/// Data for registering a newly stored file.
#[derive(Debug, Clone)]
pub struct NewManagedFile {
    /// Stable public handle.
    pub url: String,
    /// Filename as uploaded.
    pub original_name: String,
    /// UUID-based name on disk.
    pub stored_name: String,
    /// Coarse kind.
    pub file_type: FileKind,
    /// Storage category.
    pub category: FileCategory,
    /// Size in bytes.
    pub size: i64,
}

impl NewManagedFile {
    /// Create metadata for a stored file.
    pub fn new(
        url: impl Into<String>,
        original_name: impl Into<String>,
        stored_name: impl Into<String>,
        file_type: FileKind,
        category: FileCategory,
        size: i64,
    ) -> Self {
        Self {
            url: url.into(),
            original_name: original_name.into(),
            stored_name: stored_name.into(),
            file_type,
            category,
            size,
        }
    }
}

/// Repository for managed file metadata.
pub struct ManagedFileRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ManagedFileRepository<'a> {
    /// Create a new ManagedFileRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Register a new managed file.
    pub async fn create(&self, new_file: &NewManagedFile) -> Result<ManagedFile> {
        let now = datetime::now_rfc3339();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO managed_files (url, original_name, stored_name, file_type,
                                        category, size, created_at, modified_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
        )
        .bind(&new_file.url)
        .bind(&new_file.original_name)
        .bind(&new_file.stored_name)
        .bind(new_file.file_type.as_str())
        .bind(new_file.category.as_str())
        .bind(new_file.size)
        .bind(&now)
        .bind(&now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| QuillError::NotFound("file".to_string()))
    }

    /// Get a managed file by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<ManagedFile>> {
        let result: Option<ManagedFileRow> = sqlx::query_as(
            "SELECT id, url, original_name, stored_name, file_type, category,
                    size, created_at, modified_at
             FROM managed_files WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_file()))
    }

    /// Get a managed file by its public URL.
    pub async fn get_by_url(&self, url: &str) -> Result<Option<ManagedFile>> {
        let result: Option<ManagedFileRow> = sqlx::query_as(
            "SELECT id, url, original_name, stored_name, file_type, category,
                    size, created_at, modified_at
             FROM managed_files WHERE url = $1",
        )
        .bind(url)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into_file()))
    }

    /// List all managed files, newest first.
    pub async fn list_all(&self) -> Result<Vec<ManagedFile>> {
        let rows: Vec<ManagedFileRow> = sqlx::query_as(
            "SELECT id, url, original_name, stored_name, file_type, category,
                    size, created_at, modified_at
             FROM managed_files ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_file()).collect())
    }

    /// List managed files in a category, newest first.
    pub async fn list_by_category(&self, category: FileCategory) -> Result<Vec<ManagedFile>> {
        let rows: Vec<ManagedFileRow> = sqlx::query_as(
            "SELECT id, url, original_name, stored_name, file_type, category,
                    size, created_at, modified_at
             FROM managed_files WHERE category = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(category.as_str())
        .fetch_all(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.into_file()).collect())
    }

    /// Record a category change: category, url, and modified_at move
    /// together so the metadata always matches the physical location.
    ///
    /// Returns the updated file, or None if not found.
    pub async fn set_category(
        &self,
        id: i64,
        category: FileCategory,
        url: &str,
    ) -> Result<Option<ManagedFile>> {
        let result = sqlx::query(
            "UPDATE managed_files SET category = $1, url = $2, modified_at = $3 WHERE id = $4",
        )
        .bind(category.as_str())
        .bind(url)
        .bind(datetime::now_rfc3339())
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a managed file's metadata.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM managed_files WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count files in a category.
    pub async fn count_by_category(&self, category: FileCategory) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM managed_files WHERE category = $1")
                .bind(category.as_str())
                .fetch_one(self.pool)
                .await
                .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// Total size of all managed files in bytes.
    pub async fn total_size(&self) -> Result<i64> {
        let total: (i64,) = sqlx::query_as("SELECT COALESCE(SUM(size), 0) FROM managed_files")
            .fetch_one(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(total.0)
    }
}

/// Internal struct for mapping database rows to ManagedFile.
#[derive(sqlx::FromRow)]
struct ManagedFileRow {
    id: i64,
    url: String,
    original_name: String,
    stored_name: String,
    file_type: String,
    category: String,
    size: i64,
    created_at: String,
    modified_at: String,
}

impl ManagedFileRow {
    fn into_file(self) -> ManagedFile {
        ManagedFile {
            id: self.id,
            url: self.url,
            original_name: self.original_name,
            stored_name: self.stored_name,
            file_type: self.file_type.parse().unwrap_or(FileKind::Document),
            category: self.category.parse().unwrap_or(FileCategory::Documents),
            size: self.size,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}
