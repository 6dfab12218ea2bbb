//! Bulk operation types for the file pipeline.

use std::str::FromStr;

use super::category::FileCategory;
use super::{MAX_SILENT_AGE_DAYS, MAX_SILENT_SIZE};

/// A bulk operation requested from the admin file manager.
///
/// One variant per operation kind; the loose `{operation, options}` wire
/// shape is parsed into this at the handler boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    /// Move files into another category.
    Move {
        /// Target category.
        new_category: FileCategory,
    },
    /// Copy files into another category, keeping the originals.
    Copy {
        /// Target category.
        new_category: FileCategory,
    },
    /// Delete files permanently.
    Delete,
    /// Move files into the archived category.
    Archive,
    /// Sweep the whole managed set by age and size.
    Cleanup(CleanupSpec),
}

impl FileOperation {
    /// Name of the operation as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            FileOperation::Move { .. } => "move",
            FileOperation::Copy { .. } => "copy",
            FileOperation::Delete => "delete",
            FileOperation::Archive => "archive",
            FileOperation::Cleanup(_) => "cleanup",
        }
    }
}

/// Parameters for a cleanup sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupSpec {
    /// Files strictly older than this many days are deleted when
    /// `delete_old` is set.
    pub max_age_days: i64,
    /// Files strictly larger than this many bytes are deleted when
    /// `delete_large` is set.
    pub max_size_bytes: i64,
    /// Delete files exceeding the age threshold.
    pub delete_old: bool,
    /// Delete files exceeding the size threshold.
    pub delete_large: bool,
}

impl Default for CleanupSpec {
    fn default() -> Self {
        Self {
            max_age_days: MAX_SILENT_AGE_DAYS,
            max_size_bytes: MAX_SILENT_SIZE,
            delete_old: false,
            delete_large: false,
        }
    }
}

/// A per-file failure captured during a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    /// File URL the failure applies to.
    pub file: String,
    /// Why it failed.
    pub reason: String,
}

/// Aggregated outcome of a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Files processed successfully.
    pub successful: usize,
    /// Files that failed.
    pub failed: usize,
    /// Per-file failure reasons.
    pub errors: Vec<FileError>,
}

impl BatchSummary {
    /// Record one successful file.
    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    /// Record one failed file with its reason.
    pub fn record_failure(&mut self, file: impl Into<String>, reason: impl Into<String>) {
        self.failed += 1;
        self.errors.push(FileError {
            file: file.into(),
            reason: reason.into(),
        });
    }
}

/// Full result of one bulk operation.
///
/// `deleted_files` and `freed_space` are only set for cleanup sweeps.
#[derive(Debug, Clone, Default)]
pub struct OperationOutcome {
    /// Per-file summary.
    pub summary: BatchSummary,
    /// Number of files removed by a cleanup sweep.
    pub deleted_files: Option<u64>,
    /// Bytes reclaimed by a cleanup sweep.
    pub freed_space: Option<u64>,
}

/// One row of a preflight report: validity plus a safety warning, so the
/// admin UI can ask for confirmation before submitting the batch.
#[derive(Debug, Clone)]
pub struct PreflightEntry {
    /// File URL.
    pub file: String,
    /// Whether the operation would be allowed for this file.
    pub is_valid: bool,
    /// Rejection reason when invalid.
    pub reason: Option<String>,
    /// Safety warning when the file should not be moved silently.
    pub warning: Option<String>,
}

/// Operation kind parsed from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Move,
    Copy,
    Delete,
    Archive,
    Cleanup,
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "move" => Ok(OperationKind::Move),
            "copy" => Ok(OperationKind::Copy),
            "delete" => Ok(OperationKind::Delete),
            "archive" => Ok(OperationKind::Archive),
            "cleanup" => Ok(OperationKind::Cleanup),
            _ => Err(format!("unknown operation: {s}")),
        }
    }
}
