use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::error::{AgentError, WeatherError};
use crate::settings::WeatherSettings;

pub const TEMPERATURE_UNAVAILABLE: &str = "N/A";
pub const CONDITIONS_ERROR: &str = "error";
pub const CONDITIONS_UNKNOWN: &str = "unknown";

/// Uniform result of a weather lookup. Failures are carried by the sentinels above.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WeatherResult {
    pub city: String,
    pub temperature: String,
    pub conditions: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherStatus {
    Available,
    /// Network or service trouble, worth retrying later.
    ServiceError,
    /// The service could not resolve the city.
    UnknownCity,
}

impl WeatherResult {
    pub fn failed(city: &str, conditions: &str) -> Self {
        Self {
            city: city.to_string(),
            temperature: TEMPERATURE_UNAVAILABLE.to_string(),
            conditions: conditions.to_string(),
        }
    }

    pub fn status(&self) -> WeatherStatus {
        if self.temperature != TEMPERATURE_UNAVAILABLE {
            WeatherStatus::Available
        } else if self.conditions == CONDITIONS_ERROR {
            WeatherStatus::ServiceError
        } else {
            WeatherStatus::UnknownCity
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Never fails outward; see [`WeatherResult::status`].
    async fn fetch(&self, city: &str) -> WeatherResult;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(settings: &WeatherSettings) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    async fn try_fetch(&self, city: &str) -> Result<WeatherResult, WeatherError> {
        let payload: Value = self
            .client
            .get(&self.base_url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match payload.get("cod") {
            Some(code) if code.as_i64() == Some(200) => {}
            other => {
                let code = other.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string());
                let message = payload
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown error")
                    .to_string();
                return Err(WeatherError::Rejected { code, message });
            }
        }

        let temp = payload
            .pointer("/main/temp")
            .and_then(|v| match v {
                Value::Number(n) => Some(n),
                _ => None,
            })
            .ok_or_else(|| WeatherError::Malformed("missing main.temp".to_string()))?;
        let conditions = payload
            .pointer("/weather/0/description")
            .and_then(Value::as_str)
            .ok_or_else(|| WeatherError::Malformed("missing weather[0].description".to_string()))?;
        let name = payload
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| WeatherError::Malformed("missing name".to_string()))?;

        Ok(WeatherResult {
            city: name.to_string(),
            temperature: format!("{}°C", format_temperature(temp)),
            conditions: conditions.to_string(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch(&self, city: &str) -> WeatherResult {
        match self.try_fetch(city).await {
            Ok(result) => result,
            Err(WeatherError::Rejected { code, message }) => {
                log::warn!("Weather service error for {} (cod {}): {}", city, code, message);
                WeatherResult::failed(city, CONDITIONS_UNKNOWN)
            }
            Err(e) => {
                log::warn!("Network or API key error fetching weather for {}: {}", city, e);
                WeatherResult::failed(city, CONDITIONS_ERROR)
            }
        }
    }
}

/// Integral numbers print as-is, floats keep at least one decimal (15.0, 12.34).
fn format_temperature(temp: &serde_json::Number) -> String {
    if let Some(i) = temp.as_i64() {
        return i.to_string();
    }
    match temp.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.1}", f),
        Some(f) => f.to_string(),
        None => temp.to_string(),
    }
}
