use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::{
    LocationSelector, WeatherError, WeatherRecord,
    config::Config,
};

use super::WeatherService;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
    key_check_city: String,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            key_check_city: config.key_check_city.clone(),
        })
    }

    /// Client pointed at an arbitrary base URL, e.g. a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let config = Config { base_url: base_url.into(), ..Config::default() };
        Self::new(&config)
    }

    async fn get(&self, resource: &str, query: &[(&str, String)]) -> Result<WeatherRecord> {
        let url = format!("{}/{resource}", self.base_url);
        tracing::debug!(%url, "requesting OpenWeather {resource}");

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({resource})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {resource} response body"))?;

        // Rejections still carry a JSON body with `cod` and `message`, so the
        // HTTP status is only logged.
        tracing::debug!(%status, "OpenWeather {resource} responded");

        let parsed: Value = serde_json::from_str(&body).with_context(|| {
            format!(
                "Failed to parse OpenWeather {resource} JSON (status {status}): {}",
                truncate_body(&body)
            )
        })?;

        Ok(WeatherRecord::new(parsed))
    }
}

#[async_trait]
impl WeatherService for OpenWeatherClient {
    async fn check_api_key(&self, api_key: &str) -> Result<(), WeatherError> {
        let query = [
            ("q", self.key_check_city.clone()),
            ("APPID", api_key.to_string()),
            ("units", "metric".to_string()),
        ];

        let record = self.get("forecast", &query).await.map_err(transport)?;

        // The forecast endpoint reports success as the string "200".
        match record.cod() {
            Some(Value::String(cod)) if cod == "200" => Ok(()),
            _ => {
                tracing::warn!(cod = ?record.cod(), "API key rejected");
                Err(WeatherError::InvalidApiKey(record.message().to_string()))
            }
        }
    }

    async fn current(
        &self,
        api_key: &str,
        location: &LocationSelector,
    ) -> Result<WeatherRecord, WeatherError> {
        let mut query = location.query();
        query.push(("APPID", api_key.to_string()));
        query.push(("units", "metric".to_string()));

        let record = self.get("weather", &query).await.map_err(transport)?;

        // The weather endpoint reports success as the integer 200.
        match record.cod().and_then(Value::as_i64) {
            Some(200) => Ok(record),
            _ => {
                tracing::warn!(cod = ?record.cod(), mode = location.mode(), "weather request rejected");
                Err(WeatherError::Fetch { mode: location.mode(), message: record.message().to_string() })
            }
        }
    }
}

fn transport(err: anyhow::Error) -> WeatherError {
    WeatherError::Transport(format!("{err:#}"))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
