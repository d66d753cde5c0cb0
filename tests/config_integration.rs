use salon_chat_widget::config::WidgetConfig;
use serial_test::serial;
use std::env;
use std::fs;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("WIDGET_API__BASE_URL");
        env::remove_var("WIDGET_SESSION__STORAGE_PATH");
        env::remove_var("WIDGET_UI__WELCOME_DELAY_MS");
        env::remove_var("CONFIG_FILE");
        env::remove_var("API_BASE_URL");
        env::remove_var("SESSION_FILE");
        env::remove_var("WELCOME_DELAY_MS");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = WidgetConfig::load_from_args(["salon-chat-widget"]).expect("defaults load");
    assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.session.storage_path, ".salon-chat/session.json");
    assert_eq!(config.ui.welcome_delay_ms, 200);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("WIDGET_API__BASE_URL", "http://example.test:9090");
    }

    let config = WidgetConfig::load_from_args(["salon-chat-widget"]).expect("env load");
    assert_eq!(config.api.base_url, "http://example.test:9090");

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_override_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("WIDGET_API__BASE_URL", "http://from-env.test");
    }

    let config = WidgetConfig::load_from_args([
        "salon-chat-widget",
        "--base-url",
        "http://from-cli.test",
    ])
    .expect("cli load");
    assert_eq!(config.api.base_url, "http://from-cli.test");

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let config_content = r#"
api:
  base_url: "http://from-file.test:7070"
ui:
  welcome_delay_ms: 50
    "#;

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("widget_test.yaml");
    fs::write(&file_path, config_content).expect("Failed to write temp config");

    let config = WidgetConfig::load_from_args([
        "salon-chat-widget",
        "--config",
        file_path.to_str().expect("utf8 path"),
    ])
    .expect("Failed to load config from file");
    assert_eq!(config.api.base_url, "http://from-file.test:7070");
    assert_eq!(config.ui.welcome_delay_ms, 50);
    // Unset keys still fall back to defaults.
    assert_eq!(config.session.storage_path, ".salon-chat/session.json");

    clear_env_vars();
}
