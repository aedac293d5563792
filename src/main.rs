//! # Gateway Config
//!
//! Startup check for the gateway configuration.
//!
//! Loads the configuration exactly as the gateway would, initializes logging
//! from its `LOG` section and prints the effective record as JSON with
//! secrets masked. Pass a top-level key (e.g. `WEBHOOK`) to print only that
//! section. Exits non-zero when loading fails.

use anyhow::{Context, Result};
use tracing::info;

use gateway_config::config::{ConfigKey, ConfigService};

fn main() -> Result<()> {
    // Load events go to a bootstrap subscriber until LOG is known
    let service = tracing::subscriber::with_default(
        gateway_config::telemetry::bootstrap_subscriber(),
        ConfigService::load,
    )
    .context("Failed to load configuration")?;

    gateway_config::telemetry::init_tracing(service.log());

    info!(
        mode = %service.mode(),
        scheme = %service.server().scheme,
        port = ?service.server().port,
        production = service.production(),
        "Configuration ready"
    );

    let redacted = service.configuration().redacted();
    let output = match std::env::args().nth(1) {
        Some(name) => {
            let key: ConfigKey = name.parse()?;
            serde_json::to_string_pretty(&redacted.entry(key))?
        }
        None => serde_json::to_string_pretty(&redacted)?,
    };

    println!("{output}");

    Ok(())
}
