//! Environment lookup and source-mode selection.

use std::collections::HashMap;
use std::fmt;

/// Variable selecting managed (container) mode
pub const SELECTOR_VAR: &str = "DOCKER_ENV";

/// Variable carrying the production marker
pub const PRODUCTION_VAR: &str = "NODE_ENV";

/// Value of [`PRODUCTION_VAR`] that marks a production run
pub const PRODUCTION_MARKER: &str = "PROD";

/// Read access to environment variables.
///
/// The process environment is the usual implementation; tests and embedding
/// services can supply any map instead.
pub trait EnvSource {
    /// Value of `key`, or `None` when unset or not valid unicode
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| value.to_string())
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Where the configuration record comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// YAML file on local disk
    Default,
    /// One environment variable per leaf; listen address fixed by the platform
    Managed,
}

impl SourceMode {
    /// Pick the mode from the selector variable
    pub fn detect(env: &(impl EnvSource + ?Sized)) -> Self {
        if env.var(SELECTOR_VAR).as_deref() == Some("true") {
            Self::Managed
        } else {
            Self::Default
        }
    }

    pub fn is_managed(self) -> bool {
        self == Self::Managed
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("file"),
            Self::Managed => f.write_str("environment"),
        }
    }
}

/// Whether the production marker is set
pub fn is_production(env: &(impl EnvSource + ?Sized)) -> bool {
    env.var(PRODUCTION_VAR).as_deref() == Some(PRODUCTION_MARKER)
}
