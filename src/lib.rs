//! # Gateway Config Library
//!
//! This crate loads the configuration of the messaging webhook gateway:
//! - YAML file on local disk (default mode)
//! - One environment variable per field (managed/container mode)
//! - Strict coercion of booleans, integers and comma-separated lists
//! - Typed access to every top-level section
//!
//! ## Module Structure
//!
//! ```text
//! gateway_config/
//! +-- config/      Record types, schema, loading service
//! +-- middleware/  Tower layers built from the configuration
//! +-- shared/      Common utilities (errors)
//! +-- telemetry    Tracing setup driven by the LOG section
//! ```

// Configuration module
pub mod config;

// Middleware built from configuration
pub mod middleware;

// Shared utilities
pub mod shared;

// Telemetry and observability
pub mod telemetry;

pub use config::{ConfigKey, ConfigService, Configuration};
pub use shared::{ConfigError, Result};
