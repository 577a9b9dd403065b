// SPDX-License-Identifier: MIT

use crate::contract::error::LookupError;
use crate::contract::tool::Tool;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

const QUOTE_ENDPOINT: &str = "https://query1.finance.yahoo.com/v7/finance/quote";

static STOCK_PRICE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "symbol": {
                "type": "string",
                "description": "Ticker symbol like 'TSLA' or 'AAPL'"
            }
        },
        "required": ["symbol"]
    })
});

#[derive(Debug, Deserialize)]
struct StockPriceArgs {
    symbol: String,
}

pub struct StockPriceTool {
    client: Client,
}

impl StockPriceTool {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// A quote without a live price renders the explicit "couldn't retrieve"
/// line, never a numeric default.
pub fn render_quote(payload: &Value, symbol: &str) -> String {
    let result = payload
        .get("quoteResponse")
        .and_then(|r| r.get("result"))
        .and_then(Value::as_array)
        .and_then(|arr| arr.first());

    let Some(quote) = result else {
        return missing_price_message();
    };
    let Some(price) = quote.get("regularMarketPrice").and_then(Value::as_f64) else {
        return missing_price_message();
    };
    let name = quote
        .get("shortName")
        .and_then(Value::as_str)
        .unwrap_or(symbol);

    format!(
        "The current stock price of {} ({}) is ${:.2}.",
        name,
        symbol.to_uppercase(),
        price
    )
}

fn missing_price_message() -> String {
    "I couldn't retrieve the stock price. Please check the ticker symbol.".to_string()
}

#[async_trait]
impl Tool for StockPriceTool {
    fn name(&self) -> &str {
        "stock_price"
    }

    fn description(&self) -> &str {
        "Gets the real-time stock price for a ticker symbol like 'TSLA' or 'AAPL'."
    }

    fn schema(&self) -> &Value {
        &STOCK_PRICE_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: StockPriceArgs = serde_json::from_value(input)?;

        let resp = self
            .client
            .get(QUOTE_ENDPOINT)
            .query(&[("symbols", args.symbol.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(LookupError::upstream(
                "stock quote",
                format!("status {}", resp.status()),
            ));
        }

        let payload: Value = resp.json().await?;
        Ok(render_quote(&payload, &args.symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_with_price_renders_two_decimals() {
        let payload = json!({
            "quoteResponse": {
                "result": [{
                    "shortName": "Tesla, Inc.",
                    "regularMarketPrice": 248.5
                }]
            }
        });
        let text = render_quote(&payload, "tsla");
        assert_eq!(
            text,
            "The current stock price of Tesla, Inc. (TSLA) is $248.50."
        );
    }

    #[test]
    fn missing_price_field_is_explicit_not_numeric() {
        let payload = json!({
            "quoteResponse": {
                "result": [{"shortName": "Tesla, Inc."}]
            }
        });
        let text = render_quote(&payload, "TSLA");
        assert!(text.contains("couldn't retrieve"));
        assert!(!text.contains('$'));
    }

    #[test]
    fn empty_result_set_is_explicit() {
        let payload = json!({"quoteResponse": {"result": []}});
        assert!(render_quote(&payload, "NOPE").contains("couldn't retrieve"));
    }
}
