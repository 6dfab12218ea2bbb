//! Contact inbox module for quillboard.
//!
//! Stores messages submitted through the public contact form; delivery to
//! an external mail service is out of scope here.

mod repository;
mod types;

pub use repository::ContactRepository;
pub use types::{ContactMessage, NewContactMessage};
