//! API handlers for the admin console.

pub mod comments;
pub mod contacts;
pub mod files;
pub mod posts;
pub mod users;

pub use comments::*;
pub use contacts::*;
pub use files::*;
pub use posts::*;
pub use users::*;

use std::sync::Arc;

use crate::file::FileStore;
use crate::Database;

/// Shared database handle for the web layer.
pub type SharedDatabase = Arc<Database>;

/// Application state shared across handlers.
///
/// Constructed once at startup; repositories are built per request from
/// the pool it carries.
pub struct AppState {
    /// Database handle.
    pub db: SharedDatabase,
    /// Physical file store.
    pub store: FileStore,
    /// Maximum upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create application state.
    pub fn new(db: SharedDatabase, store: FileStore, max_upload_size_mb: u64) -> Self {
        Self {
            db,
            store,
            max_upload_size: max_upload_size_mb * 1024 * 1024,
        }
    }
}
