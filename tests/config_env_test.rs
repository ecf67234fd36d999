// Environment-driven configuration tests
// These mutate process environment variables, so they run serially.

use chatwire::config::{ClientConfig, ENV_CONNECT_TIMEOUT, ENV_MAX_BUFFER, ENV_URL};
use chatwire::error::ConfigError;
use serial_test::serial;
use std::time::Duration;

fn clear_env() {
    std::env::remove_var(ENV_URL);
    std::env::remove_var(ENV_MAX_BUFFER);
    std::env::remove_var(ENV_CONNECT_TIMEOUT);
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.chat_url(), "http://127.0.0.1:8000/api/chat");
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var(ENV_URL, "https://chat.internal:8443/");
    std::env::set_var(ENV_MAX_BUFFER, "65536");
    std::env::set_var(ENV_CONNECT_TIMEOUT, "2");

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url, "https://chat.internal:8443");
    assert_eq!(config.chat_url(), "https://chat.internal:8443/api/chat");
    assert_eq!(config.max_buffer_bytes, 65536);
    assert_eq!(config.decoder().max_buffer_bytes, 65536);
    assert_eq!(config.connect_timeout, Duration::from_secs(2));

    clear_env();
}

#[test]
#[serial]
fn test_from_env_blank_values_are_ignored() {
    clear_env();
    std::env::set_var(ENV_URL, "  ");
    std::env::set_var(ENV_MAX_BUFFER, "");

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config, ClientConfig::default());

    clear_env();
}

#[test]
#[serial]
fn test_from_env_invalid_number() {
    clear_env();
    std::env::set_var(ENV_MAX_BUFFER, "lots");

    let err = ClientConfig::from_env().unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidNumber {
            var: ENV_MAX_BUFFER.to_string(),
            value: "lots".to_string(),
        }
    );
    assert_eq!(err.error_code(), "E_CONFIG_NUMBER");

    clear_env();
}

#[test]
#[serial]
fn test_from_env_zero_buffer() {
    clear_env();
    std::env::set_var(ENV_MAX_BUFFER, "0");

    assert_eq!(ClientConfig::from_env(), Err(ConfigError::ZeroBufferLimit));

    clear_env();
}

#[test]
#[serial]
fn test_from_env_bad_url() {
    clear_env();
    std::env::set_var(ENV_URL, "localhost:8000");

    assert!(matches!(
        ClientConfig::from_env(),
        Err(ConfigError::InvalidBaseUrl(url)) if url == "localhost:8000"
    ));

    clear_env();
}
