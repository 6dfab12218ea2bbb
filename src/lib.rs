//! Quillboard - blog platform admin console backend.
//!
//! CRUD for posts, comments, contacts, users, and managed files, plus the
//! bulk file operation pipeline and a demo content seeder.

pub mod comment;
pub mod config;
pub mod contact;
pub mod datetime;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod post;
pub mod seed;
pub mod web;

pub use config::Config;
pub use db::{Database, NewUser, Role, User, UserRepository, UserUpdate};
pub use error::{QuillError, Result};
pub use web::WebServer;
