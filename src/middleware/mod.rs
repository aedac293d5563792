//! Middleware
//!
//! Tower middleware built from the loaded configuration.

pub mod cors;

pub use cors::create_cors_layer;
