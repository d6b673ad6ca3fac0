use std::fs;

use tempfile::TempDir;

use studybot::error::{ConfigError, Error};
use studybot::infrastructure::config::settings::Config;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn shipped_example_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.toml");
    let config = Config::load(path).expect("example config loads");

    assert_eq!(config.server.path, "/studybot");
    assert!(config.bind_addr().is_ok());
}

#[test]
fn file_values_are_loaded() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[server]
bind = "127.0.0.1:7000"

[llm]
model = "gpt-4o"
temperature = 1.0

[identity]
jwks_url = "http://127.0.0.1:9999/keys"
"#,
    );

    let config = Config::load(&path).unwrap();

    assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:7000");
    assert_eq!(config.llm.model, "gpt-4o");
    assert_eq!(config.identity.jwks_url, "http://127.0.0.1:9999/keys");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();

    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.server.bind, "0.0.0.0:8081");
}

#[test]
fn missing_file_is_an_error_for_strict_load() {
    let dir = TempDir::new().unwrap();

    let result = Config::load(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn invalid_file_is_not_replaced_by_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[llm]\ntemperature = -1.0\n");

    match Config::load_or_default(&path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "temperature",
            ..
        })) => {}
        Err(err) => panic!("expected invalid temperature, got {err}"),
        Ok(_) => panic!("expected invalid temperature, got a config"),
    }
}

#[test]
fn port_applies_on_top_of_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[server]\nbind = \"127.0.0.1:7000\"\n");

    let config = Config::load(&path).unwrap().with_port(Some("9090")).unwrap();

    assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:9090");
}
