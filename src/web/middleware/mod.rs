//! Middleware for the admin API.
//!
//! Admin gating itself lives upstream (reverse proxy / session layer);
//! this service only carries transport-level middleware.

pub mod cors;

pub use cors::create_cors_layer;
