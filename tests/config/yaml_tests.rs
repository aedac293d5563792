//! Default-mode (YAML file) loading tests

use pretty_assertions::assert_eq;

use gateway_config::config::*;
use gateway_config::ConfigError;

use crate::common::{workdir_with, TestEnv, FULL_ENV_YML};

fn load(yaml: &str, env: &TestEnv) -> Result<ConfigService, ConfigError> {
    let dir = workdir_with(yaml);
    ConfigService::load_from(env.vars(), dir.path())
}

#[test]
fn test_full_document_loads_field_for_field() {
    let service = load(FULL_ENV_YML, &TestEnv::empty()).unwrap();
    let config = service.configuration();

    assert_eq!(service.mode(), SourceMode::Default);
    assert_eq!(
        config.server,
        HttpServer {
            scheme: HttpScheme::Https,
            port: Some(8443),
        }
    );
    assert_eq!(
        config.cors,
        Cors {
            origin: vec![
                "https://app.example.com".into(),
                "https://admin.example.com".into()
            ],
            methods: vec![
                HttpMethod::Post,
                HttpMethod::Get,
                HttpMethod::Put,
                HttpMethod::Delete
            ],
            credentials: true,
        }
    );
    assert_eq!(
        config.ssl_conf.privkey.as_deref(),
        Some("/etc/ssl/private/gateway.key")
    );
    assert_eq!(
        config.store,
        StoreConf {
            cleaning_interval: Some(7200),
            messages: true,
            contacts: false,
            chats: true,
        }
    );
    assert_eq!(
        config.database.save_data,
        SaveData {
            instance: true,
            old_message: false,
            new_message: true,
            message_update: true,
            contacts: false,
            chats: true,
        }
    );
    assert!(config.database.enabled);
    assert_eq!(config.database.connection.db_prefix_name, "gateway");
    assert_eq!(config.redis.uri, "redis://cache:6379");
    assert_eq!(
        config.log.level,
        vec![LogLevel::Error, LogLevel::Warn, LogLevel::Info]
    );
    assert_eq!(config.del_instance, Some(DelInstance::Minutes(15)));
    assert_eq!(
        config.webhook.global_url(),
        Some("https://hooks.example.com/gateway")
    );
    assert!(config.webhook.events.group_participants_update);
    assert!(!config.webhook.events.presence_update);
    assert!(!config.webhook.events.new_jwt_token);
    assert_eq!(config.config_session_phone.name.as_deref(), Some("Chrome"));
    assert_eq!(config.qrcode.limit, Some(6));
    assert_eq!(config.authentication.kind, AuthType::Jwt);
    assert_eq!(config.authentication.jwt.expirin_in, 7200);
    assert_eq!(config.authentication.jwt.secret, "super-secret-signing-key");
}

#[test]
fn test_loaded_record_matches_document() {
    let service = load(FULL_ENV_YML, &TestEnv::empty()).unwrap();
    let document: Configuration = serde_yaml::from_str(FULL_ENV_YML).unwrap();

    assert_eq!(service.configuration(), &document);
}

#[test]
fn test_file_values_kept_outside_managed_mode() {
    let env = TestEnv::empty().set("SERVER_PORT", "9000");
    let service = load(FULL_ENV_YML, &env).unwrap();

    assert_eq!(service.server().scheme, HttpScheme::Https);
    assert_eq!(service.server().port, Some(8443));
}

#[test]
fn test_production_marker_applies_to_file_mode() {
    let service = load(FULL_ENV_YML, &TestEnv::empty().set("NODE_ENV", "PROD")).unwrap();
    assert!(service.production());

    let service = load(FULL_ENV_YML, &TestEnv::empty().set("NODE_ENV", "dev")).unwrap();
    assert!(!service.production());
}

#[test]
fn test_production_in_file_is_overwritten() {
    let yaml = format!("{FULL_ENV_YML}\nPRODUCTION: true\n");
    let service = load(&yaml, &TestEnv::empty()).unwrap();

    assert!(!service.production());
}

#[test]
fn test_del_instance_flag_in_file() {
    let yaml = FULL_ENV_YML.replace("DEL_INSTANCE: 15", "DEL_INSTANCE: false");
    let service = load(&yaml, &TestEnv::empty()).unwrap();

    assert_eq!(service.del_instance(), Some(DelInstance::Flag(false)));
}

#[test]
fn test_invalid_yaml_is_fatal() {
    let err = load("SERVER: [http\nCORS: {", &TestEnv::empty()).unwrap_err();

    assert!(matches!(err, ConfigError::Malformed { .. }));
    assert!(!err.is_missing_source());
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigService::load_from(TestEnv::empty().vars(), dir.path()).unwrap_err();

    match err {
        ConfigError::SourceUnavailable { path, .. } => {
            assert_eq!(path, config_path(dir.path()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bundled_env_file_loads() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let service = ConfigService::load_from(TestEnv::empty().vars(), root).unwrap();

    assert_eq!(service.server().port, Some(8083));
    assert_eq!(service.del_instance(), Some(DelInstance::Flag(false)));
    assert_eq!(service.log().level.len(), 7);
    assert!(service.log().level.iter().all(LogLevel::is_known));
}
