//! Comment moderation module for quillboard.

mod repository;
mod types;

pub use repository::CommentRepository;
pub use types::{Comment, CommentStatus, NewComment};
