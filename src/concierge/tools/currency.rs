// SPDX-License-Identifier: MIT

//! Currency conversion from free text of the shape
//! `<amount> <CODE> to|in <CODE>`.

use crate::concierge::config::Config;
use crate::contract::error::LookupError;
use crate::contract::tool::Tool;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

const PAIR_ENDPOINT: &str = "https://v6.exchangerate-api.com/v6";

static QUERY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*([A-Za-z]{3})\s+(?:to|in)\s+([A-Za-z]{3})")
        .expect("conversion query pattern is valid")
});

static CURRENCY_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "Conversion request like '100 USD to INR'"
            }
        },
        "required": ["query"]
    })
});

#[derive(Debug, Deserialize)]
struct CurrencyArgs {
    query: String,
}

/// A parsed conversion request. `amount_text` keeps the user's own figure for
/// echoing back; `amount` is the numeric value for the rate lookup.
#[derive(Debug, PartialEq)]
pub struct ConversionQuery {
    pub amount_text: String,
    pub amount: f64,
    pub from: String,
    pub to: String,
}

pub fn parse_query(text: &str) -> Option<ConversionQuery> {
    let caps = QUERY_RE.captures(text)?;
    let amount_text = caps[1].to_string();
    let amount = amount_text.parse().ok()?;
    Some(ConversionQuery {
        amount_text,
        amount,
        from: caps[2].to_uppercase(),
        to: caps[3].to_uppercase(),
    })
}

pub fn format_hint() -> String {
    "Please format your query like '100 USD to INR'.".to_string()
}

/// Normalize the pair-endpoint payload into the final answer.
pub fn render_conversion(query: &ConversionQuery, payload: &Value) -> Result<String, LookupError> {
    if payload.get("result").and_then(Value::as_str) != Some("success") {
        let reason = payload
            .get("error-type")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(LookupError::upstream("currency", reason));
    }

    let Some(converted) = payload.get("conversion_result").and_then(Value::as_f64) else {
        return Err(LookupError::upstream(
            "currency",
            "conversion result missing from response",
        ));
    };

    Ok(format!(
        "As of today's exchange rates, {} {} is approximately {:.2} {}.",
        query.amount_text, query.from, converted, query.to
    ))
}

pub struct CurrencyTool {
    client: Client,
    api_key: Option<String>,
}

impl CurrencyTool {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.exchange_rate_key.clone(),
        }
    }
}

#[async_trait]
impl Tool for CurrencyTool {
    fn name(&self) -> &str {
        "currency_converter"
    }

    fn description(&self) -> &str {
        "Converts between currencies, like '100 USD to INR'."
    }

    fn schema(&self) -> &Value {
        &CURRENCY_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: CurrencyArgs = serde_json::from_value(input)?;

        // Reject malformed text before any network or key checks.
        let Some(query) = parse_query(&args.query) else {
            return Err(LookupError::invalid_input(format_hint()));
        };

        let Some(api_key) = &self.api_key else {
            return Err(LookupError::not_configured("currency conversion"));
        };

        let url = format!(
            "{PAIR_ENDPOINT}/{}/pair/{}/{}/{}",
            api_key, query.from, query.to, query.amount
        );
        let resp = self.client.get(url).send().await?;

        if !resp.status().is_success() {
            return Err(LookupError::upstream(
                "currency",
                format!("status {}", resp.status()),
            ));
        }

        let payload: Value = resp.json().await?;
        render_conversion(&query, &payload)
    }
}
