//! Post management module for quillboard.
//!
//! Provides the post model, slug generation, CRUD persistence, and the
//! service layer used by the admin console and the seeder.

mod repository;
mod service;
mod slug;
mod types;

pub use repository::PostRepository;
pub use service::PostService;
pub use slug::{slugify, MAX_SLUG_ATTEMPTS};
pub use types::{NewPost, Post, PostStatus, PostUpdate};

/// Maximum length for a post title (in characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for a post excerpt (in characters).
pub const MAX_EXCERPT_LENGTH: usize = 500;
