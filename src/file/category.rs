//! File categories and type detection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Storage bucket a managed file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    /// General images.
    Images,
    /// Documents and other non-image uploads.
    Documents,
    /// Images used as post covers.
    CoverImages,
    /// Archived files removed from active use.
    Archived,
}

impl FileCategory {
    /// All categories, in display order.
    pub const ALL: [FileCategory; 4] = [
        FileCategory::Images,
        FileCategory::Documents,
        FileCategory::CoverImages,
        FileCategory::Archived,
    ];

    /// Convert category to its database / URL string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Images => "images",
            FileCategory::Documents => "documents",
            FileCategory::CoverImages => "cover-images",
            FileCategory::Archived => "archived",
        }
    }

    /// Directory name under the storage root.
    pub fn dir_name(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "images" => Ok(FileCategory::Images),
            "documents" => Ok(FileCategory::Documents),
            "cover-images" => Ok(FileCategory::CoverImages),
            "archived" => Ok(FileCategory::Archived),
            _ => Err(format!("unknown file category: {s}")),
        }
    }
}

/// Coarse file kind stored on the metadata row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// An image file.
    Image,
    /// Everything else.
    Document,
}

impl FileKind {
    /// Convert kind to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Document => "document",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(FileKind::Image),
            "document" => Ok(FileKind::Document),
            _ => Err(format!("unknown file kind: {s}")),
        }
    }
}

/// File type detected from the original filename.
///
/// Drives the category compatibility table; coarser than a full MIME
/// lookup on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedType {
    /// Raster or vector image.
    Image,
    /// Word-processor document.
    Document,
    /// Plain text.
    Text,
    /// PDF.
    Pdf,
    /// Spreadsheet.
    Spreadsheet,
    /// Presentation.
    Presentation,
    /// Compressed archive.
    Archive,
    /// Anything unrecognized.
    Other,
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "ico", "avif",
];
const DOCUMENT_EXTENSIONS: &[&str] = &["doc", "docx", "odt", "rtf"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "log"];
const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "ods", "csv"];
const PRESENTATION_EXTENSIONS: &[&str] = &["ppt", "pptx", "odp", "key"];
const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "tar", "gz", "tgz", "rar", "7z", "bz2"];

impl DetectedType {
    /// Detect the file type from a filename's extension.
    pub fn from_name(file_name: &str) -> Self {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            DetectedType::Image
        } else if ext == "pdf" {
            DetectedType::Pdf
        } else if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
            DetectedType::Document
        } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            DetectedType::Text
        } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
            DetectedType::Spreadsheet
        } else if PRESENTATION_EXTENSIONS.contains(&ext.as_str()) {
            DetectedType::Presentation
        } else if ARCHIVE_EXTENSIONS.contains(&ext.as_str()) {
            DetectedType::Archive
        } else {
            DetectedType::Other
        }
    }

    /// Coarse kind stored on the metadata row.
    pub fn kind(&self) -> FileKind {
        match self {
            DetectedType::Image => FileKind::Image,
            _ => FileKind::Document,
        }
    }

    /// Human-readable label used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            DetectedType::Image => "image",
            DetectedType::Document => "document",
            DetectedType::Text => "text",
            DetectedType::Pdf => "pdf",
            DetectedType::Spreadsheet => "spreadsheet",
            DetectedType::Presentation => "presentation",
            DetectedType::Archive => "archive",
            DetectedType::Other => "unrecognized",
        }
    }
}
