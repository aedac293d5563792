//! Common Test Utilities
//!
//! Shared fixtures for configuration loading tests.

use std::collections::HashMap;
use std::path::Path;

use tempfile::TempDir;

/// Complete configuration document with every field set.
pub const FULL_ENV_YML: &str = r#"
SERVER:
  TYPE: https
  PORT: 8443
CORS:
  ORIGIN:
    - https://app.example.com
    - https://admin.example.com
  METHODS: [POST, GET, PUT, DELETE]
  CREDENTIALS: true
SSL_CONF:
  PRIVKEY: /etc/ssl/private/gateway.key
  FULLCHAIN: /etc/ssl/certs/gateway.pem
STORE:
  CLEANING_INTERVAL: 7200
  MESSAGES: true
  CONTACTS: false
  CHATS: true
DATABASE:
  ENABLED: true
  CONNECTION:
    URI: mongodb://root:root@db:27017
    DB_PREFIX_NAME: gateway
  SAVE_DATA:
    INSTANCE: true
    OLD_MESSAGE: false
    NEW_MESSAGE: true
    MESSAGE_UPDATE: true
    CONTACTS: false
    CHATS: true
REDIS:
  ENABLED: true
  URI: redis://cache:6379
  PREFIX_KEY: gateway
LOG:
  LEVEL: [ERROR, WARN, INFO]
  COLOR: true
DEL_INSTANCE: 15
WEBHOOK:
  GLOBAL:
    URL: https://hooks.example.com/gateway
    ENABLED: true
  EVENTS:
    QRCODE_UPDATED: true
    MESSAGES_SET: false
    MESSAGES_UPSERT: true
    MESSAGES_UPDATE: true
    SEND_MESSAGE: true
    CONTACTS_SET: false
    CONTACTS_UPDATE: true
    CONTACTS_UPSERT: true
    PRESENCE_UPDATE: false
    CHATS_SET: false
    CHATS_UPDATE: true
    CHATS_DELETE: true
    CHATS_UPSERT: true
    CONNECTION_UPDATE: true
    GROUPS_UPSERT: true
    GROUP_UPDATE: true
    GROUP_PARTICIPANTS_UPDATE: true
    NEW_JWT_TOKEN: false
CONFIG_SESSION_PHONE:
  CLIENT: Gateway
  NAME: Chrome
QRCODE:
  LIMIT: 6
AUTHENTICATION:
  TYPE: jwt
  API_KEY:
    KEY: B6D711FCDE4D4FD5936544120E713976
  JWT:
    EXPIRIN_IN: 7200
    SECRET: super-secret-signing-key
"#;

/// Working directory holding `src/env.yml` with the given content
pub fn workdir_with(yaml: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_env_file(dir.path(), yaml);
    dir
}

/// Write `src/env.yml` under `root`
pub fn write_env_file(root: &Path, yaml: &str) {
    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::write(root.join("src").join("env.yml"), yaml).unwrap();
}

/// Environment builder for managed-mode tests.
#[derive(Debug, Clone, Default)]
pub struct TestEnv {
    vars: HashMap<String, String>,
}

impl TestEnv {
    /// Empty environment (default mode)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Managed mode with every mandatory variable set
    pub fn managed() -> Self {
        Self::empty()
            .set("DOCKER_ENV", "true")
            .set("CORS_ORIGIN", "*")
            .set("CORS_METHODS", "POST,GET,PUT,DELETE")
            .set("DATABASE_CONNECTION_URI", "mongodb://db:27017")
            .set("DATABASE_CONNECTION_DB_PREFIX_NAME", "gateway")
            .set("REDIS_URI", "redis://cache:6379")
            .set("REDIS_PREFIX_KEY", "gateway")
            .set("LOG_LEVEL", "ERROR,WARN")
            .set("AUTHENTICATION_TYPE", "apikey")
            .set("AUTHENTICATION_API_KEY_KEY", "api-key")
            .set("AUTHENTICATION_JWT_SECRET", "jwt-secret")
    }

    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn unset(mut self, key: &str) -> Self {
        self.vars.remove(key);
        self
    }

    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }
}
