//! Batch executor for bulk file operations.
//!
//! Semantics are best-effort: each file is validated and mutated on its
//! own, failures are recorded and the batch continues. Nothing is rolled
//! back; a batch interrupted mid-way leaves the completed files in their
//! new state.

use chrono::Utc;
use tracing::{info, warn};

use super::category::{DetectedType, FileCategory};
use super::metadata::{ManagedFile, ManagedFileRepository};
use super::operation::{
    BatchSummary, CleanupSpec, FileOperation, OperationOutcome, PreflightEntry,
};
use super::storage::FileStore;
use super::validate::{check_category, safety_check};
use crate::db::DbPool;
use crate::{datetime, QuillError, Result};

/// Executor for bulk file operations.
///
/// Holds the injected pool and store; construct one per process and pass
/// it down rather than reaching for globals.
pub struct BatchExecutor<'a> {
    pool: &'a DbPool,
    store: &'a FileStore,
}

impl<'a> BatchExecutor<'a> {
    /// Create a new executor over the given pool and store.
    pub fn new(pool: &'a DbPool, store: &'a FileStore) -> Self {
        Self { pool, store }
    }

    /// Execute a bulk operation against a list of file URLs.
    ///
    /// Cleanup ignores the URL list and sweeps the whole managed set.
    /// Only infrastructure-level failures (listing the file set) surface
    /// as `Err`; per-file problems land in the summary.
    pub async fn execute(
        &self,
        operation: &FileOperation,
        urls: &[String],
    ) -> Result<OperationOutcome> {
        info!(
            operation = operation.name(),
            files = urls.len(),
            "Executing bulk file operation"
        );

        if let FileOperation::Cleanup(spec) = operation {
            return self.run_cleanup(spec).await;
        }

        let repo = ManagedFileRepository::new(self.pool);
        let mut summary = BatchSummary::default();

        for url in urls {
            let file = match repo.get_by_url(url).await {
                Ok(Some(file)) => file,
                Ok(None) => {
                    summary.record_failure(url.as_str(), "File not found");
                    continue;
                }
                Err(e) => {
                    summary.record_failure(url.as_str(), e.to_string());
                    continue;
                }
            };

            let result = match operation {
                FileOperation::Move { new_category } => {
                    self.move_file(file, *new_category, true).await
                }
                FileOperation::Copy { new_category } => self.copy_file(file, *new_category).await,
                FileOperation::Delete => self.delete_file(file).await,
                FileOperation::Archive => {
                    self.move_file(file, FileCategory::Archived, false).await
                }
                FileOperation::Cleanup(_) => unreachable!("handled above"),
            };

            match result {
                Ok(()) => summary.record_success(),
                Err(e) => {
                    let reason = match e {
                        QuillError::Validation(msg) => msg,
                        other => other.to_string(),
                    };
                    summary.record_failure(url.as_str(), reason);
                }
            }
        }

        if summary.failed > 0 {
            warn!(
                operation = operation.name(),
                failed = summary.failed,
                "Bulk operation finished with failures"
            );
        }

        Ok(OperationOutcome {
            summary,
            deleted_files: None,
            freed_space: None,
        })
    }

    /// Report validity and safety warnings for a batch without mutating
    /// anything, so the UI can prompt for confirmation first.
    pub async fn preflight(
        &self,
        operation: &FileOperation,
        urls: &[String],
    ) -> Result<Vec<PreflightEntry>> {
        let repo = ManagedFileRepository::new(self.pool);
        let now = Utc::now();
        let mut entries = Vec::with_capacity(urls.len());

        for url in urls {
            let entry = match repo.get_by_url(url).await? {
                None => PreflightEntry {
                    file: url.clone(),
                    is_valid: false,
                    reason: Some("File not found".to_string()),
                    warning: None,
                },
                Some(file) => {
                    let check = match operation {
                        FileOperation::Move { new_category }
                        | FileOperation::Copy { new_category } => Some(check_category(
                            *new_category,
                            DetectedType::from_name(&file.original_name),
                            &file.original_name,
                        )),
                        _ => None,
                    };
                    let safety =
                        safety_check(&file.original_name, file.size, &file.created_at, now);

                    let (is_valid, reason) = match check {
                        Some(check) => (check.is_valid, check.reason),
                        None => (true, None),
                    };

                    PreflightEntry {
                        file: url.clone(),
                        is_valid,
                        reason,
                        warning: safety.warning,
                    }
                }
            };
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Move one file into a new category.
    ///
    /// `validate` is skipped for the archive operation, which accepts any
    /// file type.
    async fn move_file(
        &self,
        file: ManagedFile,
        new_category: FileCategory,
        validate: bool,
    ) -> Result<()> {
        if validate {
            let check = check_category(
                new_category,
                DetectedType::from_name(&file.original_name),
                &file.original_name,
            );
            if !check.is_valid {
                return Err(QuillError::Validation(
                    check.reason.unwrap_or_else(|| "incompatible category".to_string()),
                ));
            }
        }

        if file.category == new_category {
            // Already there; count as done
            return Ok(());
        }

        self.store
            .move_file(&file.stored_name, file.category, new_category)?;

        let new_url = FileStore::public_url(new_category, &file.stored_name);
        let repo = ManagedFileRepository::new(self.pool);
        match repo.set_category(file.id, new_category, &new_url).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(QuillError::NotFound("file".to_string())),
            Err(e) => {
                // Physical move already happened; put the bytes back so the
                // metadata keeps pointing at a real file
                let _ = self
                    .store
                    .move_file(&file.stored_name, new_category, file.category);
                Err(e)
            }
        }
    }

    /// Copy one file into a new category under a fresh stored name.
    async fn copy_file(&self, file: ManagedFile, new_category: FileCategory) -> Result<()> {
        let check = check_category(
            new_category,
            DetectedType::from_name(&file.original_name),
            &file.original_name,
        );
        if !check.is_valid {
            return Err(QuillError::Validation(
                check.reason.unwrap_or_else(|| "incompatible category".to_string()),
            ));
        }

        let new_stored = self
            .store
            .copy_file(&file.stored_name, file.category, new_category)?;

        let repo = ManagedFileRepository::new(self.pool);
        let new_file = super::metadata::NewManagedFile::new(
            FileStore::public_url(new_category, &new_stored),
            file.original_name.clone(),
            new_stored.clone(),
            file.file_type,
            new_category,
            file.size,
        );

        if let Err(e) = repo.create(&new_file).await {
            let _ = self.store.delete(new_category, &new_stored);
            return Err(e);
        }

        Ok(())
    }

    /// Delete one file: bytes first, then metadata.
    async fn delete_file(&self, file: ManagedFile) -> Result<()> {
        // A missing physical file is not an error here; the metadata row
        // is stale and should go regardless
        self.store.delete(file.category, &file.stored_name)?;

        let repo = ManagedFileRepository::new(self.pool);
        repo.delete(file.id).await?;
        Ok(())
    }

    /// Sweep the managed file set by age and size.
    pub async fn run_cleanup(&self, spec: &CleanupSpec) -> Result<OperationOutcome> {
        let repo = ManagedFileRepository::new(self.pool);
        let files = repo.list_all().await?;
        let now = Utc::now();

        let mut summary = BatchSummary::default();
        let mut deleted_files: u64 = 0;
        let mut freed_space: u64 = 0;

        for file in files {
            let too_old =
                spec.delete_old && datetime::age_in_days(&file.created_at, now) > spec.max_age_days;
            let too_large = spec.delete_large && file.size > spec.max_size_bytes;

            if !too_old && !too_large {
                continue;
            }

            let url = file.url.clone();
            let size = file.size;
            match self.delete_file(file).await {
                Ok(()) => {
                    summary.record_success();
                    deleted_files += 1;
                    freed_space += size.max(0) as u64;
                }
                Err(e) => summary.record_failure(url, e.to_string()),
            }
        }

        info!(
            deleted_files,
            freed_space, "Cleanup sweep finished"
        );

        Ok(OperationOutcome {
            summary,
            deleted_files: Some(deleted_files),
            freed_space: Some(freed_space),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::metadata::NewManagedFile;
    use crate::Database;
    use tempfile::TempDir;

    async fn setup() -> (Database, TempDir, FileStore) {
        let db = Database::open_in_memory().await.unwrap();
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();
        (db, temp_dir, store)
    }

    /// Store bytes and register metadata, returning the public URL.
    async fn upload(
        db: &Database,
        store: &FileStore,
        name: &str,
        category: FileCategory,
        content: &[u8],
    ) -> String {
        let stored = store.save(content, category, name).unwrap();
        let url = FileStore::public_url(category, &stored);
        let detected = DetectedType::from_name(name);
        ManagedFileRepository::new(db.pool())
            .create(&NewManagedFile::new(
                url.clone(),
                name,
                stored,
                detected.kind(),
                category,
                content.len() as i64,
            ))
            .await
            .unwrap();
        url
    }

    #[tokio::test]
    async fn test_move_batch_success() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        let url = upload(&db, &store, "photo.png", FileCategory::Images, b"img").await;

        let outcome = executor
            .execute(
                &FileOperation::Move {
                    new_category: FileCategory::CoverImages,
                },
                &[url.clone()],
            )
            .await
            .unwrap();

        assert_eq!(outcome.summary.successful, 1);
        assert_eq!(outcome.summary.failed, 0);

        let repo = ManagedFileRepository::new(db.pool());
        assert!(repo.get_by_url(&url).await.unwrap().is_none());

        let moved = repo
            .list_by_category(FileCategory::CoverImages)
            .await
            .unwrap();
        assert_eq!(moved.len(), 1);
        assert!(store.exists(FileCategory::CoverImages, &moved[0].stored_name));
        assert!(!store.exists(FileCategory::Images, &moved[0].stored_name));
    }

    #[tokio::test]
    async fn test_move_batch_partial_failure_continues() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        // File #2 is an executable targeting documents; #1 and #3 are fine
        let a = upload(&db, &store, "report.pdf", FileCategory::Images, b"pdf").await;
        let b = upload(&db, &store, "tool.exe", FileCategory::Images, b"exe").await;
        let c = upload(&db, &store, "notes.txt", FileCategory::Images, b"txt").await;

        let outcome = executor
            .execute(
                &FileOperation::Move {
                    new_category: FileCategory::Documents,
                },
                &[a, b.clone(), c],
            )
            .await
            .unwrap();

        assert_eq!(outcome.summary.successful, 2);
        assert_eq!(outcome.summary.failed, 1);
        assert_eq!(outcome.summary.errors.len(), 1);
        assert_eq!(outcome.summary.errors[0].file, b);
        assert_eq!(
            outcome.summary.errors[0].reason,
            "Executable files cannot be moved to documents category"
        );
    }

    #[tokio::test]
    async fn test_move_incompatible_type_reason() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        let url = upload(&db, &store, "report.docx", FileCategory::Documents, b"doc").await;

        let outcome = executor
            .execute(
                &FileOperation::Move {
                    new_category: FileCategory::Images,
                },
                &[url],
            )
            .await
            .unwrap();

        assert_eq!(outcome.summary.failed, 1);
        assert_eq!(
            outcome.summary.errors[0].reason,
            "Only image files can be moved to images category"
        );
    }

    #[tokio::test]
    async fn test_missing_file_recorded_not_thrown() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        let outcome = executor
            .execute(
                &FileOperation::Delete,
                &["/uploads/images/ghost.png".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(outcome.summary.successful, 0);
        assert_eq!(outcome.summary.failed, 1);
        assert_eq!(outcome.summary.errors[0].reason, "File not found");
    }

    #[tokio::test]
    async fn test_copy_keeps_original() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        let url = upload(&db, &store, "hero.png", FileCategory::Images, b"img").await;

        let outcome = executor
            .execute(
                &FileOperation::Copy {
                    new_category: FileCategory::CoverImages,
                },
                &[url.clone()],
            )
            .await
            .unwrap();

        assert_eq!(outcome.summary.successful, 1);

        let repo = ManagedFileRepository::new(db.pool());
        assert!(repo.get_by_url(&url).await.unwrap().is_some());
        assert_eq!(
            repo.count_by_category(FileCategory::CoverImages).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_archive_accepts_any_type() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        let url = upload(&db, &store, "tool.exe", FileCategory::Documents, b"exe").await;

        let outcome = executor
            .execute(&FileOperation::Archive, &[url])
            .await
            .unwrap();

        assert_eq!(outcome.summary.successful, 1);
        let repo = ManagedFileRepository::new(db.pool());
        assert_eq!(
            repo.count_by_category(FileCategory::Archived).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_removes_bytes_and_metadata() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        let url = upload(&db, &store, "bye.png", FileCategory::Images, b"img").await;
        let repo = ManagedFileRepository::new(db.pool());
        let stored = repo.get_by_url(&url).await.unwrap().unwrap().stored_name;

        let outcome = executor
            .execute(&FileOperation::Delete, &[url.clone()])
            .await
            .unwrap();

        assert_eq!(outcome.summary.successful, 1);
        assert!(repo.get_by_url(&url).await.unwrap().is_none());
        assert!(!store.exists(FileCategory::Images, &stored));
    }

    #[tokio::test]
    async fn test_delete_with_stale_metadata_still_succeeds() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        let url = upload(&db, &store, "stale.png", FileCategory::Images, b"img").await;
        let repo = ManagedFileRepository::new(db.pool());
        let stored = repo.get_by_url(&url).await.unwrap().unwrap().stored_name;

        // Bytes vanish behind our back
        store.delete(FileCategory::Images, &stored).unwrap();

        let outcome = executor
            .execute(&FileOperation::Delete, &[url.clone()])
            .await
            .unwrap();

        assert_eq!(outcome.summary.successful, 1);
        assert!(repo.get_by_url(&url).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_by_age() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        let old_url = upload(&db, &store, "old.png", FileCategory::Images, b"old").await;
        let new_url = upload(&db, &store, "new.png", FileCategory::Images, b"new").await;

        // Backdate the first file past the age threshold
        let backdated = (Utc::now() - chrono::Duration::days(400)).to_rfc3339();
        sqlx::query("UPDATE managed_files SET created_at = $1 WHERE url = $2")
            .bind(&backdated)
            .bind(&old_url)
            .execute(db.pool())
            .await
            .unwrap();

        let outcome = executor
            .run_cleanup(&CleanupSpec {
                max_age_days: 365,
                delete_old: true,
                ..CleanupSpec::default()
            })
            .await
            .unwrap();

        assert_eq!(outcome.deleted_files, Some(1));
        assert_eq!(outcome.freed_space, Some(3));

        let repo = ManagedFileRepository::new(db.pool());
        assert!(repo.get_by_url(&old_url).await.unwrap().is_none());
        assert!(repo.get_by_url(&new_url).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cleanup_by_size() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        let big = upload(&db, &store, "big.bin", FileCategory::Documents, &[0u8; 2048]).await;
        let small = upload(&db, &store, "small.bin", FileCategory::Documents, &[0u8; 16]).await;

        let outcome = executor
            .run_cleanup(&CleanupSpec {
                max_size_bytes: 1024,
                delete_large: true,
                ..CleanupSpec::default()
            })
            .await
            .unwrap();

        assert_eq!(outcome.deleted_files, Some(1));
        assert_eq!(outcome.freed_space, Some(2048));

        let repo = ManagedFileRepository::new(db.pool());
        assert!(repo.get_by_url(&big).await.unwrap().is_none());
        assert!(repo.get_by_url(&small).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cleanup_without_flags_deletes_nothing() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        upload(&db, &store, "keep.png", FileCategory::Images, b"img").await;

        let outcome = executor
            .run_cleanup(&CleanupSpec::default())
            .await
            .unwrap();

        assert_eq!(outcome.deleted_files, Some(0));
        assert_eq!(outcome.freed_space, Some(0));
        assert_eq!(
            ManagedFileRepository::new(db.pool())
                .list_all()
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_preflight_reports_invalid_and_warnings() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        let image = upload(&db, &store, "pic.png", FileCategory::Images, b"img").await;
        let exe = upload(&db, &store, "tool.exe", FileCategory::Images, b"exe").await;

        let entries = executor
            .preflight(
                &FileOperation::Move {
                    new_category: FileCategory::Documents,
                },
                &[image, exe, "/uploads/images/ghost.png".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(entries.len(), 3);
        assert!(!entries[0].is_valid); // image into documents
        assert!(!entries[1].is_valid); // executable
        assert!(!entries[2].is_valid);
        assert_eq!(entries[2].reason.as_deref(), Some("File not found"));
    }

    #[tokio::test]
    async fn test_preflight_warns_on_old_file() {
        let (db, _tmp, store) = setup().await;
        let executor = BatchExecutor::new(db.pool(), &store);

        let url = upload(&db, &store, "ancient.png", FileCategory::Images, b"img").await;
        let backdated = (Utc::now() - chrono::Duration::days(500)).to_rfc3339();
        sqlx::query("UPDATE managed_files SET created_at = $1 WHERE url = $2")
            .bind(&backdated)
            .bind(&url)
            .execute(db.pool())
            .await
            .unwrap();

        let entries = executor
            .preflight(
                &FileOperation::Move {
                    new_category: FileCategory::CoverImages,
                },
                &[url],
            )
            .await
            .unwrap();

        assert!(entries[0].is_valid);
        assert!(entries[0].warning.as_deref().unwrap().contains("days old"));
    }
}
