//! Weather lookups against an OpenWeatherMap-compatible current-weather API.
//!
//! The gateway is a pass-through: one GET per lookup, and the report only
//! carries fields copied from the response.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::utils::logging::log_http_error;

#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request could not be completed (DNS, connect, timeout, body read).
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The API answered with something other than 200.
    #[error("weather API returned status {status}")]
    Api { status: u16 },
    /// A 200 response without the expected fields.
    #[error("unexpected weather payload: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature_celsius: f64,
    pub humidity_percent: u32,
    pub description: String,
}

impl WeatherReport {
    pub fn render(&self) -> String {
        format!(
            "Weather in {}:\n🌡 Temperature: {:.1}°C\n💧 Humidity: {}%\n☁️ {}",
            self.city, self.temperature_celsius, self.humidity_percent, self.description
        )
    }
}

#[async_trait]
pub trait WeatherGateway: Send + Sync {
    async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError>;
}

#[derive(Deserialize)]
struct CurrentWeather {
    name: Option<String>,
    main: MainReadings,
    weather: Vec<Condition>,
}

#[derive(Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: u32,
}

#[derive(Deserialize)]
struct Condition {
    description: String,
}

/// Parses a 200 response body into a report. `requested_city` labels the
/// report when the payload carries no (or an empty) `name`.
pub fn parse_report(body: &[u8], requested_city: &str) -> Result<WeatherReport, WeatherError> {
    let payload: CurrentWeather = serde_json::from_slice(body)
        .map_err(|e| WeatherError::Parse(e.to_string()))?;

    let description = payload
        .weather
        .into_iter()
        .next()
        .map(|c| c.description)
        .ok_or_else(|| WeatherError::Parse("weather list is empty".to_string()))?;

    let city = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| requested_city.to_string());

    Ok(WeatherReport {
        city,
        temperature_celsius: payload.main.temp,
        humidity_percent: payload.main.humidity,
        description,
    })
}

pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
    lang: String,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        lang: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            lang: lang.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(
            config.weather_api_url.clone(),
            config.weather_api_key.clone(),
            config.weather_lang.clone(),
            config.weather_timeout,
        )
    }
}

#[async_trait]
impl WeatherGateway for OpenWeatherClient {
    async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await
            // the URL carries the API key
            .map_err(|e| e.without_url())
            .map_err(|e| {
                log_http_error("weather lookup", &e.to_string(), Some(city));
                WeatherError::Http(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            log_http_error("weather lookup", &format!("status {status}"), Some(city));
            return Err(WeatherError::Api { status: status.as_u16() });
        }

        let body = response.bytes().await.map_err(|e| WeatherError::Http(e.without_url()))?;
        parse_report(&body, city)
    }
}
