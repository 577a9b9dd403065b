// SPDX-License-Identifier: MIT

//! Fixed-deposit interest rates scraped from a fixed listing page.
//! Row order follows the source table.

use crate::contract::error::LookupError;
use crate::contract::tool::Tool;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const RATES_PAGE: &str = "https://www.bankbazaar.com/fixed-deposit/5years-fd-interest-rates.html";
const SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);
const TOP_ROWS: usize = 5;
const OTHER_ROWS: usize = 3;

static FD_RATES_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "bank_name": {
                "type": "string",
                "description": "Optional bank name to highlight, like 'HDFC'",
                "default": ""
            }
        }
    })
});

#[derive(Debug, Deserialize)]
struct FdRatesArgs {
    #[serde(default)]
    bank_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    pub bank: String,
    pub general: String,
    pub senior: String,
}

/// Extract (bank, general rate, senior rate) rows from the first table on
/// the page, in source order. Sync on purpose: `Html` is not `Send`, so it
/// must not live across an await point.
pub fn parse_rate_table(html: &str) -> Vec<RateRow> {
    let document = Html::parse_document(html);
    let Ok(row_sel) = Selector::parse("table tr") else {
        return Vec::new();
    };
    let Ok(cell_sel) = Selector::parse("td") else {
        return Vec::new();
    };

    document
        .select(&row_sel)
        .filter_map(|row| {
            let cells: Vec<String> = row
                .select(&cell_sel)
                .map(|c| c.text().collect::<String>().trim().to_string())
                .collect();
            // Header rows use <th> and yield no <td> cells.
            if cells.len() < 3 {
                return None;
            }
            Some(RateRow {
                bank: cells[0].clone(),
                general: cells[1].clone(),
                senior: cells[2].clone(),
            })
        })
        .collect()
}

pub fn render_rates(rows: &[RateRow], bank_filter: &str) -> String {
    let line = |row: &RateRow| {
        format!(
            "{}: {} (General), {} (Senior)",
            row.bank, row.general, row.senior
        )
    };

    let filter = bank_filter.trim().to_lowercase();
    if !filter.is_empty() {
        let matched: Vec<&RateRow> = rows
            .iter()
            .filter(|row| row.bank.to_lowercase().contains(&filter))
            .collect();
        if !matched.is_empty() {
            let mut out: Vec<String> = matched.iter().map(|row| line(row)).collect();
            out.push("\nHere are a few other banks:".to_string());
            out.extend(
                rows.iter()
                    .filter(|row| !matched.contains(row))
                    .take(OTHER_ROWS)
                    .map(line),
            );
            return out.join("\n");
        }
    }

    rows.iter().take(TOP_ROWS).map(line).collect::<Vec<_>>().join("\n")
}

pub struct FdRatesTool {
    client: Client,
}

impl FdRatesTool {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for FdRatesTool {
    fn name(&self) -> &str {
        "fd_rates"
    }

    fn description(&self) -> &str {
        "Fetches the latest fixed deposit interest rates, optionally highlighting one bank \
         alongside a few others."
    }

    fn schema(&self) -> &Value {
        &FD_RATES_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: FdRatesArgs = serde_json::from_value(input)?;

        let resp = self
            .client
            .get(RATES_PAGE)
            .timeout(SCRAPE_TIMEOUT)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(LookupError::upstream(
                "deposit rates",
                format!("status {}", resp.status()),
            ));
        }

        let body = resp.text().await?;
        let rows = parse_rate_table(&body);
        if rows.is_empty() {
            return Err(LookupError::upstream(
                "deposit rates",
                "rate table not found in page",
            ));
        }

        Ok(render_rates(&rows, &args.bank_name))
    }
}
