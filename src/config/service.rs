//! Configuration loading service.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::key::{ConfigEntry, ConfigKey};
use super::schema;
use super::settings::*;
use super::source::{is_production, EnvSource, ProcessEnv, SourceMode};
use crate::shared::{ConfigError, Result};

/// Directory, relative to the working directory, holding the YAML file
pub const CONFIG_DIR: &str = "src";

/// YAML file read in default mode
pub const CONFIG_FILE: &str = "env.yml";

/// Scheme forced in managed mode
pub const MANAGED_SERVER_TYPE: HttpScheme = HttpScheme::Http;

/// Port forced in managed mode
pub const MANAGED_SERVER_PORT: u16 = 8083;

/// Location of the YAML file under `root`
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Holds the configuration loaded at startup.
///
/// Build one at bootstrap and hand it (or the record inside) to every
/// consumer; there is no reload and no mutation after construction.
#[derive(Debug, Clone)]
pub struct ConfigService {
    config: Configuration,
    mode: SourceMode,
}

impl ConfigService {
    /// Load from the process environment and the current directory.
    ///
    /// A `.env` file in the working directory is applied first; variables
    /// already set in the environment take precedence over it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the selected source is missing or unusable.
    pub fn load() -> Result<Self> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let root = std::env::current_dir().map_err(|source| ConfigError::SourceUnavailable {
            path: PathBuf::from("."),
            source,
        })?;

        Self::load_from(&ProcessEnv, &root)
    }

    /// Load against an explicit environment and working directory.
    ///
    /// The sequence is:
    /// 1. pick the source mode from `DOCKER_ENV`
    /// 2. read `<root>/src/env.yml` or assemble the record from variables
    /// 3. derive `PRODUCTION` from `NODE_ENV`
    /// 4. in managed mode, force the listen scheme and port
    pub fn load_from(env: &(impl EnvSource + ?Sized), root: &Path) -> Result<Self> {
        let mode = SourceMode::detect(env);
        debug!(mode = %mode, "Configuration source selected");

        let mut config = match mode {
            SourceMode::Default => Configuration::from_yaml_file(&config_path(root))?,
            SourceMode::Managed => schema::from_env(env)?,
        };

        config.production = is_production(env);

        if mode.is_managed() {
            config.server.scheme = MANAGED_SERVER_TYPE;
            config.server.port = Some(MANAGED_SERVER_PORT);
        }

        info!(
            mode = %mode,
            scheme = %config.server.scheme,
            port = ?config.server.port,
            production = config.production,
            "Configuration loaded"
        );

        Ok(Self { config, mode })
    }

    /// Source the record was loaded from
    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    /// Value of one top-level key
    pub fn get(&self, key: ConfigKey) -> ConfigEntry<'_> {
        self.config.entry(key)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn into_configuration(self) -> Configuration {
        self.config
    }

    pub fn server(&self) -> &HttpServer {
        &self.config.server
    }

    pub fn cors(&self) -> &Cors {
        &self.config.cors
    }

    pub fn ssl_conf(&self) -> &SslConf {
        &self.config.ssl_conf
    }

    pub fn store(&self) -> &StoreConf {
        &self.config.store
    }

    pub fn database(&self) -> &Database {
        &self.config.database
    }

    pub fn redis(&self) -> &Redis {
        &self.config.redis
    }

    pub fn log(&self) -> &Log {
        &self.config.log
    }

    pub fn del_instance(&self) -> Option<DelInstance> {
        self.config.del_instance
    }

    pub fn webhook(&self) -> &Webhook {
        &self.config.webhook
    }

    pub fn config_session_phone(&self) -> &ConfigSessionPhone {
        &self.config.config_session_phone
    }

    pub fn qrcode(&self) -> &QrCode {
        &self.config.qrcode
    }

    pub fn authentication(&self) -> &Auth {
        &self.config.authentication
    }

    pub fn production(&self) -> bool {
        self.config.production
    }
}
