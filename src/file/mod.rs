//! Managed file module for quillboard.
//!
//! This module provides the admin file manager's backend:
//! - Category-based physical storage with UUID naming
//! - File metadata persistence
//! - Category compatibility validation and safety heuristics
//! - The bulk operation pipeline (move / copy / delete / archive / cleanup)

mod category;
mod executor;
mod metadata;
mod operation;
mod storage;
mod validate;

pub use category::{DetectedType, FileCategory, FileKind};
pub use executor::BatchExecutor;
pub use metadata::{ManagedFile, ManagedFileRepository, NewManagedFile};
pub use operation::{
    BatchSummary, CleanupSpec, FileError, FileOperation, OperationKind, OperationOutcome,
    PreflightEntry,
};
pub use storage::FileStore;
pub use validate::{check_category, is_executable_name, safety_check, CategoryCheck, SafetyCheck};

/// Maximum length for an original filename (in characters).
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Size above which a file is flagged as unsafe to move silently (100MB).
pub const MAX_SILENT_SIZE: i64 = 100 * 1024 * 1024;

/// Age in days above which a file is flagged as unsafe to move silently.
pub const MAX_SILENT_AGE_DAYS: i64 = 365;
