//! Top-level keys and the typed values they resolve to.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::settings::*;
use crate::shared::ConfigError;

/// Top-level configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Server,
    Cors,
    SslConf,
    Store,
    Database,
    Redis,
    Log,
    DelInstance,
    Webhook,
    ConfigSessionPhone,
    QrCode,
    Authentication,
    Production,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 13] = [
        ConfigKey::Server,
        ConfigKey::Cors,
        ConfigKey::SslConf,
        ConfigKey::Store,
        ConfigKey::Database,
        ConfigKey::Redis,
        ConfigKey::Log,
        ConfigKey::DelInstance,
        ConfigKey::Webhook,
        ConfigKey::ConfigSessionPhone,
        ConfigKey::QrCode,
        ConfigKey::Authentication,
        ConfigKey::Production,
    ];

    /// Key as written in the YAML document
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Server => "SERVER",
            ConfigKey::Cors => "CORS",
            ConfigKey::SslConf => "SSL_CONF",
            ConfigKey::Store => "STORE",
            ConfigKey::Database => "DATABASE",
            ConfigKey::Redis => "REDIS",
            ConfigKey::Log => "LOG",
            ConfigKey::DelInstance => "DEL_INSTANCE",
            ConfigKey::Webhook => "WEBHOOK",
            ConfigKey::ConfigSessionPhone => "CONFIG_SESSION_PHONE",
            ConfigKey::QrCode => "QRCODE",
            ConfigKey::Authentication => "AUTHENTICATION",
            ConfigKey::Production => "PRODUCTION",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// Borrowed value of one top-level key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigEntry<'a> {
    Server(&'a HttpServer),
    Cors(&'a Cors),
    SslConf(&'a SslConf),
    Store(&'a StoreConf),
    Database(&'a Database),
    Redis(&'a Redis),
    Log(&'a Log),
    DelInstance(Option<DelInstance>),
    Webhook(&'a Webhook),
    ConfigSessionPhone(&'a ConfigSessionPhone),
    QrCode(&'a QrCode),
    Authentication(&'a Auth),
    Production(bool),
}

impl Configuration {
    /// Value for `key`
    pub fn entry(&self, key: ConfigKey) -> ConfigEntry<'_> {
        match key {
            ConfigKey::Server => ConfigEntry::Server(&self.server),
            ConfigKey::Cors => ConfigEntry::Cors(&self.cors),
            ConfigKey::SslConf => ConfigEntry::SslConf(&self.ssl_conf),
            ConfigKey::Store => ConfigEntry::Store(&self.store),
            ConfigKey::Database => ConfigEntry::Database(&self.database),
            ConfigKey::Redis => ConfigEntry::Redis(&self.redis),
            ConfigKey::Log => ConfigEntry::Log(&self.log),
            ConfigKey::DelInstance => ConfigEntry::DelInstance(self.del_instance),
            ConfigKey::Webhook => ConfigEntry::Webhook(&self.webhook),
            ConfigKey::ConfigSessionPhone => {
                ConfigEntry::ConfigSessionPhone(&self.config_session_phone)
            }
            ConfigKey::QrCode => ConfigEntry::QrCode(&self.qrcode),
            ConfigKey::Authentication => ConfigEntry::Authentication(&self.authentication),
            ConfigKey::Production => ConfigEntry::Production(self.production),
        }
    }
}
