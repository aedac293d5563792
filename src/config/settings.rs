//! Gateway configuration record.
//!
//! Field names mirror the YAML document exactly (upper-case keys), so the
//! same types deserialize both the file and the environment-assembled tree.

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::coerce;
use crate::shared::{ConfigError, Result};

/// Placeholder written over secrets by [`Configuration::redacted`]
pub const REDACTED: &str = "********";

/// Fallback token lifetime in seconds
pub const DEFAULT_JWT_EXPIRY_SECS: i64 = 3600;

/// Generates a string-backed enum whose unknown literals survive as `Other`.
macro_rules! literal_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $lit:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Literal outside the known set, kept verbatim
            Other(String),
        }

        impl $name {
            /// The literal as written in configuration
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $lit,)+
                    Self::Other(raw) => raw,
                }
            }

            /// Whether the literal is one of the recognised values
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($lit => Self::$variant,)+
                    _ => Self::Other(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

literal_enum! {
    /// Listen scheme
    HttpScheme {
        Http => "http",
        Https => "https",
    }
}

literal_enum! {
    /// HTTP method allowed by CORS
    HttpMethod {
        Post => "POST",
        Get => "GET",
        Put => "PUT",
        Delete => "DELETE",
    }
}

literal_enum! {
    /// Gateway log level
    LogLevel {
        Error => "ERROR",
        Warn => "WARN",
        Debug => "DEBUG",
        Info => "INFO",
        Log => "LOG",
        Verbose => "VERBOSE",
        Dark => "DARK",
    }
}

literal_enum! {
    /// Authentication mode
    AuthType {
        Jwt => "jwt",
        ApiKey => "apikey",
    }
}

impl Default for HttpScheme {
    fn default() -> Self {
        Self::Http
    }
}

/// Root configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Configuration {
    /// Listen scheme and port
    pub server: HttpServer,

    /// CORS policy
    pub cors: Cors,

    /// TLS key and certificate paths
    #[serde(default)]
    pub ssl_conf: SslConf,

    /// Local cache retention policy
    pub store: StoreConf,

    /// Persistence configuration
    pub database: Database,

    /// Cache backend configuration
    pub redis: Redis,

    /// Logging configuration
    pub log: Log,

    /// Instance deletion policy; `None` when the value could not be parsed
    #[serde(default, deserialize_with = "coerce::lenient_del_instance")]
    pub del_instance: Option<DelInstance>,

    /// Outbound webhook policy
    pub webhook: Webhook,

    /// Device identity reported by sessions
    #[serde(default)]
    pub config_session_phone: ConfigSessionPhone,

    /// QR code generation cap
    pub qrcode: QrCode,

    /// Authentication mode and credentials
    pub authentication: Auth,

    /// Derived from the runtime environment, never read from the source
    #[serde(default)]
    pub production: bool,
}

/// Server binding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServer {
    #[serde(rename = "TYPE", default)]
    pub scheme: HttpScheme,

    /// `None` when the configured port is missing or not a valid port number
    #[serde(rename = "PORT", default, deserialize_with = "coerce::lenient_int")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Cors {
    pub origin: Vec<String>,
    pub methods: Vec<HttpMethod>,
    #[serde(default)]
    pub credentials: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SslConf {
    #[serde(default)]
    pub privkey: Option<String>,
    #[serde(default)]
    pub fullchain: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StoreConf {
    /// Cleaning interval in seconds; `None` disables periodic cleaning
    #[serde(default, deserialize_with = "coerce::lenient_int")]
    pub cleaning_interval: Option<u64>,
    #[serde(default)]
    pub messages: bool,
    #[serde(default)]
    pub contacts: bool,
    #[serde(default)]
    pub chats: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DbConnection {
    pub uri: String,
    pub db_prefix_name: String,
}

/// Which records are persisted when the database is enabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct SaveData {
    pub instance: bool,
    pub old_message: bool,
    pub new_message: bool,
    pub message_update: bool,
    pub contacts: bool,
    pub chats: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Database {
    pub connection: DbConnection,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub save_data: SaveData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Redis {
    #[serde(default)]
    pub enabled: bool,
    pub uri: String,
    pub prefix_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Log {
    pub level: Vec<LogLevel>,
    #[serde(default)]
    pub color: bool,
}

/// Instance deletion policy.
///
/// Either a plain switch (delete on disconnect) or a delay in minutes after
/// which an idle instance is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DelInstance {
    Flag(bool),
    Minutes(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct GlobalWebhook {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub enabled: bool,
}

/// Per-event webhook switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct EventsWebhook {
    pub qrcode_updated: bool,
    pub messages_set: bool,
    pub messages_upsert: bool,
    pub messages_update: bool,
    pub send_message: bool,
    pub contacts_set: bool,
    pub contacts_update: bool,
    pub contacts_upsert: bool,
    pub presence_update: bool,
    pub chats_set: bool,
    pub chats_update: bool,
    pub chats_delete: bool,
    pub chats_upsert: bool,
    pub connection_update: bool,
    pub groups_upsert: bool,
    pub group_update: bool,
    pub group_participants_update: bool,
    pub new_jwt_token: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Webhook {
    #[serde(default)]
    pub global: Option<GlobalWebhook>,
    #[serde(default)]
    pub events: EventsWebhook,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ConfigSessionPhone {
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct QrCode {
    #[serde(default, deserialize_with = "coerce::lenient_int")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ApiKey {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Jwt {
    /// Token lifetime in seconds
    #[serde(default = "default_jwt_expiry")]
    pub expirin_in: i64,
    pub secret: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Auth {
    #[serde(rename = "TYPE")]
    pub kind: AuthType,
    pub api_key: ApiKey,
    pub jwt: Jwt,
}

fn default_jwt_expiry() -> i64 {
    DEFAULT_JWT_EXPIRY_SECS
}

impl Configuration {
    /// Parse a YAML document into a configuration record.
    ///
    /// `origin` is only used to label errors.
    pub fn from_yaml_str(yaml: &str, origin: &Path) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Malformed {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// `SourceUnavailable` if the file cannot be read, `Malformed` if it is
    /// not valid YAML or does not match the record shape.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_yaml_str(&yaml, path)
    }

    /// Copy of the record with credentials and connection strings masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.database.connection.uri = REDACTED.into();
        copy.redis.uri = REDACTED.into();
        copy.authentication.api_key.key = REDACTED.into();
        copy.authentication.jwt.secret = REDACTED.into();
        copy
    }
}

impl HttpServer {
    /// Socket address to bind on all interfaces.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` when the port is missing or was not a valid
    /// port number in the source.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let port = self.port.ok_or_else(|| ConfigError::InvalidValue {
            field: "SERVER.PORT",
            reason: "port is missing or not a valid number".into(),
        })?;
        Ok(SocketAddr::from(([0, 0, 0, 0], port)))
    }
}

impl Webhook {
    /// Global webhook URL, if one is configured and enabled
    pub fn global_url(&self) -> Option<&str> {
        self.global
            .as_ref()
            .filter(|global| global.enabled)
            .and_then(|global| global.url.as_deref())
    }
}
