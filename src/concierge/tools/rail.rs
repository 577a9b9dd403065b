// SPDX-License-Identifier: MIT

//! Indian Railways lookups: live train running status and PNR status.
//! Both ride the same rail-data API behind a shared client.

use crate::concierge::config::Config;
use crate::concierge::format::format_duration_mins;
use crate::contract::error::LookupError;
use crate::contract::tool::Tool;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

const RAIL_HOST: &str = "irctc1.p.rapidapi.com";

// --- Rail client helper ---

#[derive(Clone)]
pub struct RailClient {
    client: Client,
    api_key: Option<String>,
}

impl RailClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.rapidapi_key.clone(),
        }
    }

    /// One GET against the rail API. The payload-level `status` flag, not
    /// the HTTP status alone, is the failure signal.
    async fn request(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, LookupError> {
        let Some(api_key) = &self.api_key else {
            return Err(LookupError::not_configured("rail status"));
        };

        let resp = self
            .client
            .get(format!("https://{RAIL_HOST}{path}"))
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", RAIL_HOST)
            .query(params)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(LookupError::upstream(
                "rail",
                format!("status {}", resp.status()),
            ));
        }

        let payload: Value = resp.json().await?;
        if !payload.get("status").and_then(Value::as_bool).unwrap_or(false) {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no data available");
            return Err(LookupError::upstream("rail", message));
        }
        Ok(payload)
    }
}

// --- Normalizers ---

fn field<'a>(data: &'a Value, key: &str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or("N/A")
}

pub fn render_train_status(payload: &Value) -> String {
    let d = payload.get("data").cloned().unwrap_or(Value::Null);

    let journey_mins = d.get("journey_time").and_then(Value::as_i64).unwrap_or(0);
    let platform = match d.get("platform_number").and_then(Value::as_i64) {
        Some(number) if number > 0 => number.to_string(),
        _ => "Not assigned".to_string(),
    };
    let pantry = if d
        .get("pantry_available")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        "Yes"
    } else {
        "No"
    };

    format!(
        "Train {} - {}\n\
         Run days: {}\n\
         Route: {} -> {}\n\
         Departure time: {}\n\
         Journey time: {}\n\
         Pantry available: {}\n\
         \n\
         Current station: {}\n\
         ETA: {} | Scheduled: {}\n\
         Delay: {} mins\n\
         Ahead distance: {}\n\
         Platform: {}\n\
         Last updated: {}",
        field(&d, "train_number"),
        field(&d, "train_name"),
        field(&d, "run_days"),
        field(&d, "source_stn_name"),
        field(&d, "dest_stn_name"),
        field(&d, "std"),
        format_duration_mins(journey_mins),
        pantry,
        field(&d, "current_station_name"),
        field(&d, "eta"),
        field(&d, "cur_stn_sta"),
        d.get("delay")
            .and_then(Value::as_i64)
            .map(|delay| delay.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        field(&d, "ahead_distance_text"),
        platform,
        field(&d, "status_as_of"),
    )
}

pub fn render_pnr_status(pnr: &str, payload: &Value) -> String {
    let d = payload.get("data").cloned().unwrap_or(Value::Null);

    let passengers = d
        .get("passengers")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .map(|p| {
                    format!(
                        "Passenger {}: {} -> {}",
                        p.get("no")
                            .and_then(Value::as_i64)
                            .map(|no| no.to_string())
                            .unwrap_or_else(|| "?".to_string()),
                        p.get("booking_status").and_then(Value::as_str).unwrap_or("N/A"),
                        p.get("current_status").and_then(Value::as_str).unwrap_or("N/A"),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    format!(
        "PNR: {}\n\
         Train {} - {}\n\
         Date: {}\n\
         Route: {} -> {}\n\
         {}",
        pnr,
        field(&d, "train_number"),
        field(&d, "train_name"),
        field(&d, "journey_date"),
        field(&d, "boarding_point"),
        field(&d, "reservation_upto"),
        passengers,
    )
}

// --- Train status tool ---

static TRAIN_STATUS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "train_number": {
                "type": "string",
                "description": "Train number like '12951'"
            },
            "start_day": {
                "type": "string",
                "description": "Journey start day offset; 1 means today",
                "default": "1"
            }
        },
        "required": ["train_number"]
    })
});

#[derive(Debug, Deserialize)]
struct TrainStatusArgs {
    train_number: String,
    #[serde(default = "default_start_day")]
    start_day: String,
}

fn default_start_day() -> String {
    "1".to_string()
}

pub struct TrainStatusTool {
    rail: RailClient,
}

impl TrainStatusTool {
    pub fn new(rail: RailClient) -> Self {
        Self { rail }
    }
}

#[async_trait]
impl Tool for TrainStatusTool {
    fn name(&self) -> &str {
        "train_status"
    }

    fn description(&self) -> &str {
        "Gets the live running status of a train. Needs 'train_number'; \
         'start_day' is optional and defaults to 1."
    }

    fn schema(&self) -> &Value {
        &TRAIN_STATUS_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: TrainStatusArgs = serde_json::from_value(input)?;
        let payload = self
            .rail
            .request(
                "/api/v1/liveTrainStatus",
                &[
                    ("trainNo", args.train_number.as_str()),
                    ("startDay", args.start_day.as_str()),
                ],
            )
            .await?;
        Ok(render_train_status(&payload))
    }
}

// --- PNR status tool ---

static PNR_STATUS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "pnr_number": {
                "type": "string",
                "description": "10-digit PNR number like '1234567890'"
            }
        },
        "required": ["pnr_number"]
    })
});

#[derive(Debug, Deserialize)]
struct PnrStatusArgs {
    pnr_number: String,
}

pub struct PnrStatusTool {
    rail: RailClient,
}

impl PnrStatusTool {
    pub fn new(rail: RailClient) -> Self {
        Self { rail }
    }
}

pub fn is_valid_pnr(pnr: &str) -> bool {
    pnr.len() == 10 && pnr.chars().all(|c| c.is_ascii_digit())
}

#[async_trait]
impl Tool for PnrStatusTool {
    fn name(&self) -> &str {
        "pnr_status"
    }

    fn description(&self) -> &str {
        "Checks Indian Railways PNR status using a 10-digit PNR number like '1234567890'."
    }

    fn schema(&self) -> &Value {
        &PNR_STATUS_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: PnrStatusArgs = serde_json::from_value(input)?;

        let pnr = args.pnr_number.trim();
        if !is_valid_pnr(pnr) {
            return Err(LookupError::invalid_input(
                "A PNR number is exactly 10 digits, like '1234567890'.",
            ));
        }

        let payload = self
            .rail
            .request("/api/v3/getPNRStatus", &[("pnrNumber", pnr)])
            .await?;
        Ok(render_pnr_status(pnr, &payload))
    }
}
