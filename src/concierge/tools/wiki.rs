// SPDX-License-Identifier: MIT

//! Encyclopedia lookups: resolve candidate titles first, then fetch the
//! summary of the best match. A disambiguation page lists the candidates
//! instead of guessing one of them.

use crate::contract::error::LookupError;
use crate::contract::tool::Tool;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

const SEARCH_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";
const SUMMARY_ENDPOINT: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";
const MAX_CANDIDATES: usize = 5;

static WIKIPEDIA_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "Topic, person or place to look up"
            }
        },
        "required": ["query"]
    })
});

#[derive(Debug, Deserialize)]
struct WikipediaArgs {
    query: String,
}

pub struct WikipediaTool {
    client: Client,
}

impl WikipediaTool {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn candidate_titles(&self, query: &str) -> Result<Vec<String>, LookupError> {
        let resp = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("action", "opensearch"),
                ("search", query),
                ("limit", "5"),
                ("format", "json"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(LookupError::upstream(
                "encyclopedia",
                format!("search returned status {}", resp.status()),
            ));
        }

        // opensearch payload: [query, [titles], [descriptions], [urls]]
        let body: Value = resp.json().await?;
        let titles = body
            .get(1)
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .take(MAX_CANDIDATES)
                    .collect()
            })
            .unwrap_or_default();
        Ok(titles)
    }

    async fn summary(&self, title: &str) -> Result<Option<Value>, LookupError> {
        let path = title.replace(' ', "_");
        let resp = self
            .client
            .get(format!("{SUMMARY_ENDPOINT}/{path}"))
            .send()
            .await?;

        if resp.status().as_u16() == 404 {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(LookupError::upstream(
                "encyclopedia",
                format!("summary returned status {}", resp.status()),
            ));
        }
        Ok(Some(resp.json().await?))
    }
}

pub fn no_match_message() -> String {
    "I couldn't find any information on that topic.".to_string()
}

pub fn render_disambiguation(candidates: &[String]) -> String {
    format!(
        "The query was too broad. Possible options: {}",
        candidates
            .iter()
            .take(MAX_CANDIDATES)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    )
}

#[async_trait]
impl Tool for WikipediaTool {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn description(&self) -> &str {
        "Looks up general knowledge or facts about people, places or topics on Wikipedia."
    }

    fn schema(&self) -> &Value {
        &WIKIPEDIA_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: WikipediaArgs = serde_json::from_value(input)?;

        let candidates = self.candidate_titles(&args.query).await?;
        let Some(first) = candidates.first() else {
            return Ok(no_match_message());
        };

        let Some(summary) = self.summary(first).await? else {
            return Ok(no_match_message());
        };

        if summary.get("type").and_then(Value::as_str) == Some("disambiguation") {
            return Ok(render_disambiguation(&candidates));
        }

        match summary.get("extract").and_then(Value::as_str) {
            Some(extract) if !extract.is_empty() => Ok(extract.to_string()),
            _ => Ok(no_match_message()),
        }
    }
}
