//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_connectapi_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("connectapi") && path_str.ends_with("config.toml"),
            "Path should contain 'connectapi' and end with 'config.toml', got: {}",
            path_str
        );
    }
}

#[test]
fn default_log_path_ends_with_connectapi_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("connectapi.log"),
        "Default log path should end with 'connectapi.log', got: {:?}",
        path
    );
}

#[test]
fn default_credential_path_ends_with_user_token() {
    let path = default_credential_path();
    assert!(path.ends_with("userToken"), "got: {:?}", path);
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("connectapi_test_config.toml");

    let toml_content = r#"
api_base_url = "https://directory.example/api"
credential_path = "/tmp/token"
request_timeout_secs = 5
trending_limit = 3
discard_stale_responses = true
auth_header = false
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(
        config.api_base_url.as_deref(),
        Some("https://directory.example/api")
    );
    assert_eq!(config.credential_path, Some(PathBuf::from("/tmp/token")));
    assert_eq!(config.request_timeout_secs, Some(5));
    assert_eq!(config.trending_limit, Some(3));
    assert_eq!(config.discard_stale_responses, Some(true));
    assert_eq!(config.auth_header, Some(false));
    assert_eq!(config.log_file_path, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("connectapi_test_invalid.toml");
    fs::write(&config_path, "api_base_url = [unclosed").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a ParseError, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let config_path = env::temp_dir().join("connectapi_test_unknown.toml");
    fs::write(&config_path, "theme = \"dark\"\n").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_reports_directory_as_read_error() {
    let dir = env::temp_dir().join("connectapi_test_config_dir");
    fs::create_dir_all(&dir).expect("create dir");

    let result = load_config_file(&dir);
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));

    fs::remove_dir_all(dir).ok();
}

#[test]
#[serial(connectapi_env)]
fn explicit_path_takes_precedence_over_env() {
    let explicit = env::temp_dir().join("connectapi_test_explicit.toml");
    let from_env = env::temp_dir().join("connectapi_test_from_env.toml");
    fs::write(&explicit, "trending_limit = 1\n").expect("write explicit");
    fs::write(&from_env, "trending_limit = 9\n").expect("write env");

    env::set_var(CONFIG_ENV, &from_env);
    let config = load_config_with_precedence(Some(explicit.clone()))
        .expect("loads")
        .expect("present");
    env::remove_var(CONFIG_ENV);

    assert_eq!(config.trending_limit, Some(1));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(connectapi_env)]
fn env_path_used_without_explicit_path() {
    let from_env = env::temp_dir().join("connectapi_test_env_only.toml");
    fs::write(&from_env, "trending_limit = 7\n").expect("write env");

    env::set_var(CONFIG_ENV, &from_env);
    let config = load_config_with_precedence(None)
        .expect("loads")
        .expect("present");
    env::remove_var(CONFIG_ENV);

    assert_eq!(config.trending_limit, Some(7));

    fs::remove_file(from_env).ok();
}

#[test]
#[serial(connectapi_env)]
fn empty_env_path_is_invalid() {
    env::set_var(CONFIG_ENV, "");
    let result = load_config_with_precedence(None);
    env::remove_var(CONFIG_ENV);

    assert!(matches!(result, Err(ConfigError::InvalidPath(_))));
}

#[test]
fn merge_config_without_file_uses_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_prefers_file_values() {
    let resolved = merge_config(Some(ConfigFile {
        api_base_url: Some("http://api.test".to_string()),
        trending_limit: Some(10),
        discard_stale_responses: Some(true),
        ..ConfigFile::default()
    }));

    let defaults = ResolvedConfig::default();
    assert_eq!(resolved.api_base_url, "http://api.test");
    assert_eq!(resolved.trending_limit, 10);
    assert!(resolved.discard_stale_responses);
    assert_eq!(resolved.request_timeout_secs, defaults.request_timeout_secs);
    assert_eq!(resolved.log_file_path, defaults.log_file_path);
}

#[test]
fn default_config_matches_page_behavior() {
    let defaults = ResolvedConfig::default();
    assert_eq!(defaults.trending_limit, 5);
    assert!(!defaults.discard_stale_responses, "baseline lets the last arrival win");
    assert!(defaults.auth_header);
    assert_eq!(defaults.request_timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn zero_timeout_disables_request_timeout() {
    let config = merge_config(Some(ConfigFile {
        request_timeout_secs: Some(0),
        ..ConfigFile::default()
    }));

    assert_eq!(config.request_timeout_secs, 0);
    assert_eq!(config.request_timeout(), None);
}

#[test]
#[serial(connectapi_env)]
fn env_overrides_apply_to_url_and_token_file() {
    env::set_var(API_URL_ENV, "http://env.test/api");
    env::set_var(TOKEN_FILE_ENV, "/env/token");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var(API_URL_ENV);
    env::remove_var(TOKEN_FILE_ENV);

    assert_eq!(config.api_base_url, "http://env.test/api");
    assert_eq!(config.credential_path, PathBuf::from("/env/token"));
}

#[test]
#[serial(connectapi_env)]
fn empty_env_overrides_are_ignored() {
    env::set_var(API_URL_ENV, "");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var(API_URL_ENV);

    assert_eq!(config.api_base_url, ResolvedConfig::default().api_base_url);
}

#[test]
fn cli_overrides_win() {
    let config = apply_cli_overrides(
        ResolvedConfig::default(),
        Some("http://cli.test".to_string()),
        Some(PathBuf::from("/cli/token")),
        Some(true),
    );

    assert_eq!(config.api_base_url, "http://cli.test");
    assert_eq!(config.credential_path, PathBuf::from("/cli/token"));
    assert!(config.discard_stale_responses);
}

#[test]
fn absent_cli_overrides_keep_values() {
    let base = merge_config(Some(ConfigFile {
        discard_stale_responses: Some(true),
        ..ConfigFile::default()
    }));

    let config = apply_cli_overrides(base.clone(), None, None, None);

    assert_eq!(config, base);
}
