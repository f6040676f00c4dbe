use weather_intake_bot::config::Config;
use std::env;
use std::sync::Mutex;
use std::time::Duration;

// Mutex to ensure config tests run sequentially to avoid environment variable conflicts
static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

const ALL_VARS: [&str; 7] = [
    "TELEGRAM_BOT_TOKEN",
    "WEATHER_API_KEY",
    "DATABASE_URL",
    "HTTP_PORT",
    "WEATHER_API_URL",
    "WEATHER_LANG",
    "WEATHER_TIMEOUT_SECS",
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

fn set_secrets() {
    env::set_var("TELEGRAM_BOT_TOKEN", "test_token_123");
    env::set_var("WEATHER_API_KEY", "weather_key_456");
}

#[test]
fn test_config_from_env_with_all_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    set_secrets();
    env::set_var("DATABASE_URL", "sqlite:test.db");
    env::set_var("HTTP_PORT", "8080");
    env::set_var("WEATHER_API_URL", "http://localhost:9999/weather");
    env::set_var("WEATHER_LANG", "ru");
    env::set_var("WEATHER_TIMEOUT_SECS", "3");

    let config = Config::from_env().unwrap();

    assert_eq!(config.telegram_bot_token, "test_token_123");
    assert_eq!(config.weather_api_key, "weather_key_456");
    assert_eq!(config.database_url, "sqlite:test.db");
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.weather_api_url, "http://localhost:9999/weather");
    assert_eq!(config.weather_lang, "ru");
    assert_eq!(config.weather_timeout, Duration::from_secs(3));

    clear_env();
}

#[test]
fn test_config_from_env_with_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    // Only set required secrets, let others use defaults
    set_secrets();

    let config = Config::from_env().unwrap();

    assert_eq!(config.database_url, "sqlite:./data/profiles.db");
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.weather_api_url, "https://api.openweathermap.org/data/2.5/weather");
    assert_eq!(config.weather_lang, "en");
    assert_eq!(config.weather_timeout, Duration::from_secs(10));

    clear_env();
}

#[test]
fn test_config_missing_required_token() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("WEATHER_API_KEY", "weather_key");

    let result = Config::from_env();
    assert!(result.is_err());

    let error_msg = result.unwrap_err().to_string();
    assert!(error_msg.contains("TELEGRAM_BOT_TOKEN must be set"));

    clear_env();
}

#[test]
fn test_config_missing_weather_key() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "test_token");

    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("WEATHER_API_KEY must be set"));

    // Blank counts as missing
    env::set_var("WEATHER_API_KEY", "   ");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("WEATHER_API_KEY must be set"));

    clear_env();
}

#[test]
fn test_config_invalid_port() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    set_secrets();
    env::set_var("HTTP_PORT", "invalid_port");

    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid HTTP_PORT"));

    env::set_var("HTTP_PORT", "-1");
    assert!(Config::from_env().is_err());

    env::set_var("HTTP_PORT", "  65535  ");
    assert_eq!(Config::from_env().unwrap().http_port, 65535);

    clear_env();
}

#[test]
fn test_config_invalid_timeout() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    set_secrets();
    for value in ["0", "soon", "-3"] {
        env::set_var("WEATHER_TIMEOUT_SECS", value);
        let error_msg = Config::from_env().unwrap_err().to_string();
        assert!(error_msg.contains("Invalid WEATHER_TIMEOUT_SECS"), "value {value}");
    }

    clear_env();
}

#[test]
fn test_config_empty_optional_values_use_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    set_secrets();
    env::set_var("DATABASE_URL", "");
    env::set_var("WEATHER_LANG", " ");

    let config = Config::from_env().unwrap();
    assert_eq!(config.database_url, "sqlite:./data/profiles.db");
    assert_eq!(config.weather_lang, "en");

    clear_env();
}

#[test]
fn test_config_debug_hides_secrets() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    set_secrets();
    let config = Config::from_env().unwrap();
    let debug = format!("{config:?}");

    assert!(!debug.contains("test_token_123"));
    assert!(!debug.contains("weather_key_456"));
    assert!(debug.contains("<redacted>"));

    clear_env();
}

#[test]
fn test_config_blank_numeric_values_use_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    set_secrets();
    env::set_var("HTTP_PORT", "");
    env::set_var("WEATHER_TIMEOUT_SECS", "  ");

    let config = Config::from_env().unwrap();
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.weather_timeout, Duration::from_secs(10));

    clear_env();
}
