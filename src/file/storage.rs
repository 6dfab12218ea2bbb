//! Physical file storage for quillboard.
//!
//! Files live under one directory per category:
//! ```text
//! {base_path}/
//! ├── images/
//! │   └── ab12cd34-5678-90ab-cdef-123456789012.png
//! ├── documents/
//! ├── cover-images/
//! └── archived/
//! ```
//! Stored names are UUID-based; the original filename only contributes the
//! extension.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::category::FileCategory;
use crate::{QuillError, Result};

/// Category-sharded file store.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Base directory for file storage.
    base_path: PathBuf,
}

impl FileStore {
    /// Create a new FileStore with the given base path.
    ///
    /// The base directory and all category directories are created if
    /// missing.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        for category in FileCategory::ALL {
            fs::create_dir_all(base_path.join(category.dir_name()))?;
        }

        Ok(Self { base_path })
    }

    /// Get the base path of this store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Save content into a category with a new UUID-based stored name.
    ///
    /// Returns the stored filename (UUID.extension).
    pub fn save(
        &self,
        content: &[u8],
        category: FileCategory,
        original_name: &str,
    ) -> Result<String> {
        let stored_name = Self::generate_stored_name(original_name);
        fs::write(self.path_for(category, &stored_name), content)?;
        Ok(stored_name)
    }

    /// Load content from storage.
    pub fn load(&self, category: FileCategory, stored_name: &str) -> Result<Vec<u8>> {
        match fs::read(self.path_for(category, stored_name)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(QuillError::NotFound(format!("File: {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Move a stored file between category directories.
    ///
    /// The stored name is preserved; only the directory changes.
    pub fn move_file(
        &self,
        stored_name: &str,
        from: FileCategory,
        to: FileCategory,
    ) -> Result<()> {
        let source = self.path_for(from, stored_name);
        let target = self.path_for(to, stored_name);

        match fs::rename(&source, &target) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(QuillError::NotFound(format!("File: {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Copy a stored file into another category under a fresh stored name.
    ///
    /// Returns the new stored name.
    pub fn copy_file(
        &self,
        stored_name: &str,
        from: FileCategory,
        to: FileCategory,
    ) -> Result<String> {
        let new_name = Self::generate_stored_name(stored_name);
        let source = self.path_for(from, stored_name);
        let target = self.path_for(to, &new_name);

        match fs::copy(&source, &target) {
            Ok(_) => Ok(new_name),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(QuillError::NotFound(format!("File: {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a file from storage.
    ///
    /// Returns `true` if the file was deleted, `false` if it didn't exist.
    pub fn delete(&self, category: FileCategory, stored_name: &str) -> Result<bool> {
        match fs::remove_file(self.path_for(category, stored_name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a file exists in storage.
    pub fn exists(&self, category: FileCategory, stored_name: &str) -> bool {
        self.path_for(category, stored_name).exists()
    }

    /// Get the size of a stored file.
    pub fn file_size(&self, category: FileCategory, stored_name: &str) -> Result<u64> {
        match fs::metadata(self.path_for(category, stored_name)) {
            Ok(m) => Ok(m.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(QuillError::NotFound(format!("File: {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Full filesystem path for a stored name.
    pub fn path_for(&self, category: FileCategory, stored_name: &str) -> PathBuf {
        self.base_path.join(category.dir_name()).join(stored_name)
    }

    /// Public URL for a stored name, used as the stable file handle.
    pub fn public_url(category: FileCategory, stored_name: &str) -> String {
        format!("/uploads/{}/{}", category.as_str(), stored_name)
    }

    /// Generate a new UUID-based stored name preserving the extension.
    pub fn generate_stored_name(original_name: &str) -> String {
        let uuid = Uuid::new_v4();
        let ext = Self::extract_extension(original_name);
        format!("{uuid}.{ext}")
    }

    /// Extract the file extension from a filename.
    ///
    /// Returns "bin" if no extension is found.
    fn extract_extension(filename: &str) -> &str {
        Path::new(filename)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("bin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, FileStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_new_creates_category_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("uploads");

        let store = FileStore::new(&root).unwrap();

        for category in FileCategory::ALL {
            assert!(root.join(category.dir_name()).is_dir());
        }
        assert_eq!(store.base_path(), root);
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, store) = setup_store();
        let content = b"Hello, World!";

        let stored_name = store
            .save(content, FileCategory::Documents, "test.txt")
            .unwrap();

        assert!(stored_name.ends_with(".txt"));
        let loaded = store.load(FileCategory::Documents, &stored_name).unwrap();
        assert_eq!(loaded, content);
    }

    #[test]
    fn test_save_extension_fallback() {
        let (_temp_dir, store) = setup_store();

        let stored_name = store
            .save(b"data", FileCategory::Documents, "no_extension")
            .unwrap();
        assert!(stored_name.ends_with(".bin"));
    }

    #[test]
    fn test_load_not_found() {
        let (_temp_dir, store) = setup_store();

        let result = store.load(FileCategory::Images, "nonexistent.png");
        assert!(matches!(result, Err(QuillError::NotFound(_))));
    }

    #[test]
    fn test_move_between_categories() {
        let (_temp_dir, store) = setup_store();

        let stored_name = store
            .save(b"photo bytes", FileCategory::Images, "pic.png")
            .unwrap();

        store
            .move_file(&stored_name, FileCategory::Images, FileCategory::CoverImages)
            .unwrap();

        assert!(!store.exists(FileCategory::Images, &stored_name));
        assert!(store.exists(FileCategory::CoverImages, &stored_name));
        assert_eq!(
            store.load(FileCategory::CoverImages, &stored_name).unwrap(),
            b"photo bytes"
        );
    }

    #[test]
    fn test_move_missing_file() {
        let (_temp_dir, store) = setup_store();

        let result = store.move_file("ghost.png", FileCategory::Images, FileCategory::Archived);
        assert!(matches!(result, Err(QuillError::NotFound(_))));
    }

    #[test]
    fn test_copy_keeps_source() {
        let (_temp_dir, store) = setup_store();

        let stored_name = store
            .save(b"shared", FileCategory::Images, "pic.png")
            .unwrap();

        let copy_name = store
            .copy_file(&stored_name, FileCategory::Images, FileCategory::CoverImages)
            .unwrap();

        assert_ne!(copy_name, stored_name);
        assert!(copy_name.ends_with(".png"));
        assert!(store.exists(FileCategory::Images, &stored_name));
        assert!(store.exists(FileCategory::CoverImages, &copy_name));
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, store) = setup_store();

        let stored_name = store
            .save(b"bye", FileCategory::Documents, "delete.txt")
            .unwrap();

        assert!(store.delete(FileCategory::Documents, &stored_name).unwrap());
        assert!(!store.exists(FileCategory::Documents, &stored_name));
        assert!(!store.delete(FileCategory::Documents, &stored_name).unwrap());
    }

    #[test]
    fn test_file_size() {
        let (_temp_dir, store) = setup_store();
        let content = vec![0xAB; 4096];

        let stored_name = store
            .save(&content, FileCategory::Documents, "big.bin")
            .unwrap();

        assert_eq!(
            store.file_size(FileCategory::Documents, &stored_name).unwrap(),
            4096
        );
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            FileStore::public_url(FileCategory::CoverImages, "ab.png"),
            "/uploads/cover-images/ab.png"
        );
    }

    #[test]
    fn test_generate_stored_name_unique() {
        let a = FileStore::generate_stored_name("x.png");
        let b = FileStore::generate_stored_name("x.png");
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
    }
}
