//! Category compatibility validation and safety heuristics.
//!
//! Both checks are pure functions; the batch executor re-runs the
//! compatibility check per file, and the safety heuristic only ever warns.

use chrono::{DateTime, Utc};

use super::category::{DetectedType, FileCategory};
use super::{MAX_SILENT_AGE_DAYS, MAX_SILENT_SIZE};
use crate::datetime;

/// Extensions never accepted into the documents category, regardless of
/// the detected type.
const EXECUTABLE_EXTENSIONS: &[&str] = &[
    "exe", "bat", "cmd", "ps1", "vbs", "js", "jar", "dll", "sys",
];

/// Check whether a filename carries an executable extension.
pub fn is_executable_name(file_name: &str) -> bool {
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    EXECUTABLE_EXTENSIONS.contains(&ext.as_str())
}

/// Result of a category compatibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCheck {
    /// Whether the file may enter the target category.
    pub is_valid: bool,
    /// Rejection reason; always present when invalid.
    pub reason: Option<String>,
}

impl CategoryCheck {
    fn ok() -> Self {
        Self {
            is_valid: true,
            reason: None,
        }
    }

    fn rejected(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Check whether a file may be moved or copied into the target category.
///
/// Rule table:
/// - images / cover-images accept only image files
/// - documents accept document, text, pdf, spreadsheet, presentation, and
///   archive files, but never executable extensions
/// - archived is reserved for the archive operation and rejects direct moves
pub fn check_category(
    target: FileCategory,
    detected: DetectedType,
    file_name: &str,
) -> CategoryCheck {
    match target {
        FileCategory::Images => {
            if detected == DetectedType::Image {
                CategoryCheck::ok()
            } else {
                CategoryCheck::rejected("Only image files can be moved to images category")
            }
        }
        FileCategory::CoverImages => {
            if detected == DetectedType::Image {
                CategoryCheck::ok()
            } else {
                CategoryCheck::rejected("Only image files can be moved to cover-images category")
            }
        }
        FileCategory::Documents => {
            if is_executable_name(file_name) {
                return CategoryCheck::rejected(
                    "Executable files cannot be moved to documents category",
                );
            }
            match detected {
                DetectedType::Document
                | DetectedType::Text
                | DetectedType::Pdf
                | DetectedType::Spreadsheet
                | DetectedType::Presentation
                | DetectedType::Archive => CategoryCheck::ok(),
                _ => CategoryCheck::rejected(format!(
                    "{} files cannot be moved to documents category",
                    capitalize(detected.label())
                )),
            }
        }
        FileCategory::Archived => CategoryCheck::rejected(
            "Files cannot be moved directly to archived category; use the archive operation",
        ),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Result of the safety heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyCheck {
    /// False when the file should not be moved without confirmation.
    pub safe: bool,
    /// Human-readable warning; always present when unsafe.
    pub warning: Option<String>,
}

/// Flag files that are unsafe to move silently.
///
/// Files over 100MB or older than 365 days get a warning; the caller
/// decides whether to ask for confirmation. Never blocks.
pub fn safety_check(
    original_name: &str,
    size: i64,
    created_at: &str,
    now: DateTime<Utc>,
) -> SafetyCheck {
    if size > MAX_SILENT_SIZE {
        let size_mb = size / 1024 / 1024;
        return SafetyCheck {
            safe: false,
            warning: Some(format!(
                "{original_name} is {size_mb}MB; large files should be moved with confirmation"
            )),
        };
    }

    let age_days = datetime::age_in_days(created_at, now);
    if age_days > MAX_SILENT_AGE_DAYS {
        return SafetyCheck {
            safe: false,
            warning: Some(format!(
                "{original_name} is {age_days} days old; verify it is still referenced before moving"
            )),
        };
    }

    SafetyCheck {
        safe: true,
        warning: None,
    }
}
