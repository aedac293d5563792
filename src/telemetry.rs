//! Telemetry and Observability
//!
//! Structured logging setup driven by the `LOG` section.

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Log, LogLevel};

/// Filter used before the configuration is available
const BOOTSTRAP_FILTER: &str = "info";

/// Tracing level name for a gateway log level, with a verbosity rank.
fn tracing_level(level: &LogLevel) -> Option<(u8, &'static str)> {
    match level {
        LogLevel::Error => Some((0, "error")),
        LogLevel::Warn => Some((1, "warn")),
        LogLevel::Info | LogLevel::Log => Some((2, "info")),
        LogLevel::Debug => Some((3, "debug")),
        LogLevel::Verbose | LogLevel::Dark => Some((4, "trace")),
        LogLevel::Other(_) => None,
    }
}

/// `EnvFilter` directive for the most verbose configured level.
///
/// Falls back to `info` when no recognised level is listed.
pub fn filter_directive(log: &Log) -> &'static str {
    log.level
        .iter()
        .filter_map(tracing_level)
        .max_by_key(|(rank, _)| *rank)
        .map(|(_, name)| name)
        .unwrap_or(BOOTSTRAP_FILTER)
}

/// Subscriber for the load phase, before `LOG` is known.
///
/// Meant for `tracing::subscriber::with_default` around configuration loading.
pub fn bootstrap_subscriber() -> impl Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
}

/// Initialize tracing subscriber
pub fn init_tracing(log: &Log) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(log)));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(log.color);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!(directive = filter_directive(log), "Tracing initialized");
}
