use std::io::Write;

use serial_test::serial;
use tempfile::NamedTempFile;

use super::*;

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp config");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn defaults_point_at_local_api() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert_eq!(settings.api.base_url.as_str(), DEFAULT_BASE_URL);
    assert_eq!(
        settings.credentials.store_path,
        PathBuf::from(DEFAULT_STORE_PATH)
    );
    assert!(settings.credentials.token.is_none());
    assert!(!settings.cross_post.slack_enabled);
    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("http://file.example/api/".to_string());
    raw.logging.level = Some("info".to_string());

    let overrides = ConfigOverrides {
        base_url: Some("https://cli.example/api/".to_string()),
        log_level: Some("debug".to_string()),
        slack_enabled: Some(true),
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "https://cli.example/api/");
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert!(settings.cross_post.slack_enabled);
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn blank_token_is_ignored() {
    let mut raw = RawSettings::default();
    raw.credentials.token = Some("   ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.credentials.token.is_none());
}

#[test]
fn rejects_non_http_base_url() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("ftp://example.com/api/".to_string());
    let err = Settings::from_raw(raw).expect_err("ftp is not supported");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "api.base_url",
            ..
        }
    ));
}

#[test]
fn rejects_unknown_log_level() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());
    let err = Settings::from_raw(raw).expect_err("invalid level");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "logging.level",
            ..
        }
    ));
}

#[test]
#[serial]
fn explicit_config_file_is_loaded() {
    let file = toml_file(
        r#"
[api]
base_url = "http://news.example/api/"

[credentials]
store_path = "/tmp/aacnews-test-store.json"

[cross_post]
slack_enabled = true
"#,
    );

    let overrides = ConfigOverrides {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let settings = load(&overrides).expect("load settings");

    assert_eq!(settings.api.base_url.as_str(), "http://news.example/api/");
    assert_eq!(
        settings.credentials.store_path,
        PathBuf::from("/tmp/aacnews-test-store.json")
    );
    assert!(settings.cross_post.slack_enabled);
}

#[test]
#[serial]
fn environment_overrides_file() {
    let file = toml_file(
        r#"
[api]
base_url = "http://file.example/api/"
"#,
    );

    // SAFETY: serialised with every other test touching the environment.
    unsafe {
        std::env::set_var("AACNEWS__API__BASE_URL", "http://env.example/api/");
    }
    let overrides = ConfigOverrides {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let result = load(&overrides);
    // SAFETY: as above.
    unsafe {
        std::env::remove_var("AACNEWS__API__BASE_URL");
    }

    let settings = result.expect("load settings");
    assert_eq!(settings.api.base_url.as_str(), "http://env.example/api/");
}

#[test]
#[serial]
fn missing_explicit_config_file_fails() {
    let overrides = ConfigOverrides {
        config_file: Some(PathBuf::from("/definitely/not/here.toml")),
        ..Default::default()
    };
    let err = load(&overrides).expect_err("missing file");
    assert!(matches!(err, LoadError::Build(_)));
}
