//! # Configuration Module
//!
//! This module loads the gateway configuration once at startup.
//! The source is picked by `DOCKER_ENV`:
//! - Default mode: a YAML document at `<cwd>/src/env.yml`
//! - Managed mode (`DOCKER_ENV=true`): one environment variable per leaf,
//!   named by joining the key path with `_` (e.g. `WEBHOOK_EVENTS_MESSAGES_UPSERT`)
//!
//! `.env` files are honoured via dotenvy. After loading, `PRODUCTION` is set
//! from `NODE_ENV=PROD`, and managed mode pins the listen address to
//! `http` on port 8083.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gateway_config::config::ConfigService;
//!
//! let config = ConfigService::load()?;
//! println!("Webhooks go to {:?}", config.webhook().global_url());
//! ```

mod coerce;
mod key;
pub mod schema;
mod service;
mod settings;
mod source;

pub use key::{ConfigEntry, ConfigKey};
pub use service::*;
pub use settings::*;
pub use source::*;

