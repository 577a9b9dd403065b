// SPDX-License-Identifier: MIT

//! Current weather for a named or auto-detected city.
//!
//! When no city is given the caller's city is resolved best-effort from the
//! requesting IP; if that fails the tool asks for a city instead of failing
//! silently, and the weather API is never called.

use crate::concierge::config::Config;
use crate::concierge::format::title_case;
use crate::contract::error::LookupError;
use crate::contract::tool::Tool;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const GEOLOCATION_ENDPOINT: &str = "https://ipinfo.io/json";
const WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(3);
const WEATHER_TIMEOUT: Duration = Duration::from_secs(5);

// --- City resolution ---

/// Best-effort resolution of the caller's city. `None` means "unknown",
/// never an error.
#[async_trait]
pub trait CityLocator: Send + Sync {
    async fn locate(&self) -> Option<String>;
}

pub struct IpInfoLocator {
    client: Client,
    token: Option<String>,
}

impl IpInfoLocator {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            token: config.ipinfo_token.clone(),
        }
    }
}

#[async_trait]
impl CityLocator for IpInfoLocator {
    async fn locate(&self) -> Option<String> {
        let mut req = self
            .client
            .get(GEOLOCATION_ENDPOINT)
            .timeout(GEOLOCATION_TIMEOUT);
        if let Some(token) = &self.token {
            req = req.query(&[("token", token.as_str())]);
        }

        let body: Value = req.send().await.ok()?.json().await.ok()?;
        body.get("city")
            .and_then(Value::as_str)
            .filter(|city| !city.is_empty())
            .map(str::to_string)
    }
}

// --- Weather tool ---

static WEATHER_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "city": {
                "type": "string",
                "description": "City name like 'Mumbai' or 'New York'; leave empty to auto-detect",
                "default": ""
            }
        }
    })
});

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    #[serde(default)]
    city: String,
}

pub struct WeatherTool {
    client: Client,
    api_key: Option<String>,
    locator: Arc<dyn CityLocator>,
}

impl WeatherTool {
    pub fn new(client: Client, config: &Config, locator: Arc<dyn CityLocator>) -> Self {
        Self {
            client,
            api_key: config.openweather_key.clone(),
            locator,
        }
    }
}

pub fn unknown_location_message() -> String {
    "I couldn't determine your location. Please provide a city name.".to_string()
}

pub fn render_report(city: &str, payload: &Value) -> Result<String, LookupError> {
    let description = payload
        .get("weather")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .and_then(|w| w.get("description"))
        .and_then(Value::as_str);
    let main = payload.get("main");
    let temp = main.and_then(|m| m.get("temp")).and_then(Value::as_f64);
    let feels_like = main
        .and_then(|m| m.get("feels_like"))
        .and_then(Value::as_f64);
    let humidity = main.and_then(|m| m.get("humidity")).and_then(Value::as_f64);

    match (description, temp, feels_like, humidity) {
        (Some(description), Some(temp), Some(feels_like), Some(humidity)) => Ok(format!(
            "The weather in {} is {}, {}\u{b0}C (feels like {}\u{b0}C), with {}% humidity.",
            title_case(city),
            title_case(description),
            temp,
            feels_like,
            humidity
        )),
        _ => Err(LookupError::upstream(
            "weather",
            "unexpected response format",
        )),
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "weather"
    }

    fn description(&self) -> &str {
        "Checks the current weather for a city. Detects the city from the caller's IP \
         when none is given."
    }

    fn schema(&self) -> &Value {
        &WEATHER_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: WeatherArgs = serde_json::from_value(input)?;

        let city = if args.city.trim().is_empty() {
            match self.locator.locate().await {
                Some(city) => city,
                None => return Ok(unknown_location_message()),
            }
        } else {
            args.city
        };

        let Some(api_key) = &self.api_key else {
            return Err(LookupError::not_configured("weather"));
        };

        let resp = self
            .client
            .get(WEATHER_ENDPOINT)
            .timeout(WEATHER_TIMEOUT)
            .query(&[
                ("q", city.as_str()),
                ("appid", api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = resp.status();
        let payload: Value = resp.json().await?;

        if !status.is_success() {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(LookupError::upstream("weather", message));
        }

        render_report(&city, &payload)
    }
}
