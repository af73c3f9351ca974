//! Loading client settings from files and building clients from them.

use std::io::Write;

use tado::config::{load_from_file, load_from_lookup, ClientConfig};
use tado::{ApiError, DEFAULT_BASE_URL};

fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_toml_file() {
    let file = write_config(
        ".toml",
        r#"
base_url = "http://localhost:8080/api/v2/"
timeout_secs = 15

[auth]
client_id = "my-client"
username = "jane@example.com"
password = "secret"
"#,
    );

    let config = load_from_file(file.path()).unwrap();

    assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/api/v2/"));
    assert_eq!(config.timeout_secs, Some(15));
    assert_eq!(config.auth.client_id.as_deref(), Some("my-client"));
    assert!(config.user_agent.is_none());
}

#[test]
fn test_load_json_file() {
    let file = write_config(
        ".json",
        r#"{"user_agent": "my-agent", "auth": {"token_url": "https://auth.example.com/token"}}"#,
    );

    let config = load_from_file(file.path()).unwrap();

    assert_eq!(config.user_agent.as_deref(), Some("my-agent"));
    assert_eq!(config.auth.oauth_config().token_url, "https://auth.example.com/token");
}

#[test]
fn test_invalid_file_contents() {
    let file = write_config(".toml", "base_url = [unterminated");
    let err = load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ApiError::Config(msg) if msg.contains("TOML")));

    let file = write_config(".json", "{");
    let err = load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ApiError::Config(msg) if msg.contains("JSON")));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));
}

#[test]
fn test_environment_overrides_file() {
    let file = write_config(
        ".toml",
        "base_url = \"http://file.example.com/api/v2/\"\nuser_agent = \"file-agent\"\n",
    );
    let env = load_from_lookup(|key: &str| {
        (key == "TADO_BASE_URL").then(|| "http://env.example.com/api/v2/".to_string())
    })
    .unwrap();

    let config = load_from_file(file.path()).unwrap().merge(env);

    assert_eq!(config.base_url.as_deref(), Some("http://env.example.com/api/v2/"));
    assert_eq!(config.user_agent.as_deref(), Some("file-agent"));
}

#[test]
fn test_builder_from_config() {
    let config = ClientConfig {
        base_url: Some("http://localhost:8080/api/v2/".to_string()),
        user_agent: Some(String::new()),
        timeout_secs: Some(3),
        ..Default::default()
    };

    let client = config.into_builder().build().unwrap();

    assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/v2/");
    assert!(client.user_agent().is_none());
    assert!(!client.is_initialized());
}

#[test]
fn test_empty_config_uses_defaults() {
    let client = ClientConfig::default().into_builder().build().unwrap();

    assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    assert_eq!(client.user_agent(), Some("go-tado"));
}
