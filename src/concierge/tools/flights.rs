// SPDX-License-Identifier: MIT

use crate::concierge::config::Config;
use crate::contract::error::LookupError;
use crate::contract::tool::Tool;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

const FLIGHTS_ENDPOINT: &str = "http://api.aviationstack.com/v1/flights";

static FLIGHT_STATUS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "flight_iata": {
                "type": "string",
                "description": "IATA flight code like 'AI101' or 'UA246'"
            }
        },
        "required": ["flight_iata"]
    })
});

#[derive(Debug, Deserialize)]
struct FlightStatusArgs {
    flight_iata: String,
}

pub struct FlightStatusTool {
    client: Client,
    api_key: Option<String>,
}

impl FlightStatusTool {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.aviationstack_key.clone(),
        }
    }
}

fn leg_field<'a>(flight: &'a Value, leg: &str, key: &str) -> &'a str {
    flight
        .get(leg)
        .and_then(|l| l.get(key))
        .and_then(Value::as_str)
        .unwrap_or("N/A")
}

pub fn render_flight(flight: &Value) -> String {
    let iata = flight
        .get("flight")
        .and_then(|f| f.get("iata"))
        .and_then(Value::as_str)
        .unwrap_or("N/A");
    let airline = flight
        .get("airline")
        .and_then(|a| a.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("N/A");
    let status = flight
        .get("flight_status")
        .and_then(Value::as_str)
        .unwrap_or("N/A");

    format!(
        "Flight {} ({})\n\
         Departure: {} at {}\n\
         Arrival: {} at {}\n\
         Status: {}",
        iata,
        airline,
        leg_field(flight, "departure", "airport"),
        leg_field(flight, "departure", "scheduled"),
        leg_field(flight, "arrival", "airport"),
        leg_field(flight, "arrival", "scheduled"),
        status,
    )
}

pub fn no_flight_message() -> String {
    "No flight found for that code.".to_string()
}

#[async_trait]
impl Tool for FlightStatusTool {
    fn name(&self) -> &str {
        "flight_status"
    }

    fn description(&self) -> &str {
        "Gets the current status of a flight using its IATA flight code, e.g. 'AI101'."
    }

    fn schema(&self) -> &Value {
        &FLIGHT_STATUS_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: FlightStatusArgs = serde_json::from_value(input)?;

        let Some(api_key) = &self.api_key else {
            return Err(LookupError::not_configured("flight status"));
        };

        let resp = self
            .client
            .get(FLIGHTS_ENDPOINT)
            .query(&[
                ("access_key", api_key.as_str()),
                ("flight_iata", args.flight_iata.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(LookupError::upstream(
                "flight",
                format!("status {}", resp.status()),
            ));
        }

        let payload: Value = resp.json().await?;
        let flights = payload.get("data").and_then(Value::as_array);
        match flights.and_then(|arr| arr.first()) {
            // Empty data is a valid "no such flight" answer, not an error.
            None => Ok(no_flight_message()),
            Some(flight) => Ok(render_flight(flight)),
        }
    }
}
