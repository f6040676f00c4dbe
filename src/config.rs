use anyhow::{anyhow, Result};
use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite:./data/profiles.db";
const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_WEATHER_LANG: &str = "en";

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub weather_api_key: String,
    pub weather_api_url: String,
    pub weather_lang: String,
    pub weather_timeout: Duration,
    pub database_url: String,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let telegram_bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let weather_api_key = required("WEATHER_API_KEY")?;

        let database_url = database_url_from_env();
        let weather_api_url = optional("WEATHER_API_URL", DEFAULT_WEATHER_API_URL);
        let weather_lang = optional("WEATHER_LANG", DEFAULT_WEATHER_LANG);

        let http_port = optional("HTTP_PORT", "3000")
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let timeout_secs: u64 = optional("WEATHER_TIMEOUT_SECS", "10")
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid WEATHER_TIMEOUT_SECS"))?;
        if timeout_secs == 0 {
            return Err(anyhow!("Invalid WEATHER_TIMEOUT_SECS"));
        }

        Ok(Config {
            telegram_bot_token,
            weather_api_key,
            weather_api_url,
            weather_lang,
            weather_timeout: Duration::from_secs(timeout_secs),
            database_url,
            http_port,
        })
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("telegram_bot_token", &"<redacted>")
            .field("weather_api_key", &"<redacted>")
            .field("weather_api_url", &self.weather_api_url)
            .field("weather_lang", &self.weather_lang)
            .field("weather_timeout", &self.weather_timeout)
            .field("database_url", &self.database_url)
            .field("http_port", &self.http_port)
            .finish()
    }
}

/// `DATABASE_URL`, or the default SQLite file when unset or blank.
pub fn database_url_from_env() -> String {
    optional("DATABASE_URL", DEFAULT_DATABASE_URL)
}

fn required(key: &str) -> Result<String> {
    let value = env::var(key).map_err(|_| anyhow!("{key} must be set"))?;

    if value.trim().is_empty() {
        return Err(anyhow!("{key} must be set"));
    }

    Ok(value)
}

fn optional(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}
