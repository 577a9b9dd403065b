// SPDX-License-Identifier: MIT

//! Keyword-search backed lookups. One upstream search API serves four tools:
//! general web search, video search, product search across two retail sites,
//! and recharge-plan search across three operator sites.

use crate::concierge::config::Config;
use crate::contract::error::LookupError;
use crate::contract::tool::Tool;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

const SEARCH_ENDPOINT: &str = "https://serpapi.com/search.json";
const TOP_RESULTS: usize = 3;

// --- Shared search client ---

#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrganicHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

impl SearchClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.serpapi_key.clone(),
        }
    }

    /// Top organic results for a keyword query. An empty result set is not
    /// an error; callers phrase it per capability.
    pub async fn organic(&self, query: &str, count: usize) -> Result<Vec<OrganicHit>, LookupError> {
        let Some(api_key) = &self.api_key else {
            return Err(LookupError::not_configured("keyword search"));
        };

        let resp = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("q", query),
                ("api_key", api_key.as_str()),
                ("num", &count.to_string()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(LookupError::upstream(
                "keyword search",
                format!("status {}", resp.status()),
            ));
        }

        let body: Value = resp.json().await?;
        let hits = body
            .get("organic_results")
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .take(count)
                    .filter_map(|r| serde_json::from_value(r.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        Ok(hits)
    }
}

// --- Rendering ---

pub fn render_hits(hits: &[OrganicHit]) -> String {
    hits.iter()
        .map(|hit| format!("{}\n{}\n{}", hit.title, hit.snippet, hit.link))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Both section headings are always present, even when a branch comes back
/// empty.
pub fn render_product_sections(amazon: &[OrganicHit], flipkart: &[OrganicHit]) -> String {
    let mut out = String::from("Amazon results:\n");
    out.push_str(&branch(amazon));
    out.push_str("\n\nFlipkart results:\n");
    out.push_str(&branch(flipkart));
    out
}

fn branch(hits: &[OrganicHit]) -> String {
    if hits.is_empty() {
        "No results found.".to_string()
    } else {
        render_hits(hits)
    }
}

// --- Web search tool ---

static WEB_SEARCH_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The search query"
            }
        },
        "required": ["query"]
    })
});

pub struct WebSearchTool {
    search: SearchClient,
}

impl WebSearchTool {
    pub fn new(search: SearchClient) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "General web search for news, events, or anything an encyclopedia cannot answer."
    }

    fn schema(&self) -> &Value {
        &WEB_SEARCH_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: QueryArgs = serde_json::from_value(input)?;
        let hits = self.search.organic(&args.query, TOP_RESULTS).await?;
        if hits.is_empty() {
            return Ok("No relevant results found.".to_string());
        }
        Ok(render_hits(&hits))
    }
}

#[derive(Debug, Deserialize)]
struct QueryArgs {
    query: String,
}

// --- Video search tool ---

static VIDEO_SEARCH_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "Topic, person or event to find recent videos about"
            }
        },
        "required": ["query"]
    })
});

pub struct VideoSearchTool {
    search: SearchClient,
}

impl VideoSearchTool {
    pub fn new(search: SearchClient) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for VideoSearchTool {
    fn name(&self) -> &str {
        "video_search"
    }

    fn description(&self) -> &str {
        "Finds recent YouTube videos about a topic or person."
    }

    fn schema(&self) -> &Value {
        &VIDEO_SEARCH_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: QueryArgs = serde_json::from_value(input)?;
        let query = format!("{} site:youtube.com", args.query);
        let hits = self.search.organic(&query, TOP_RESULTS).await?;
        if hits.is_empty() {
            return Ok("No videos found.".to_string());
        }
        Ok(render_hits(&hits))
    }
}

// --- Product search tool ---

static PRODUCT_SEARCH_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "Product to look for, like 'wireless earbuds under 2000'"
            }
        },
        "required": ["query"]
    })
});

pub struct ProductSearchTool {
    search: SearchClient,
}

impl ProductSearchTool {
    pub fn new(search: SearchClient) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for ProductSearchTool {
    fn name(&self) -> &str {
        "product_search"
    }

    fn description(&self) -> &str {
        "Finds actual product listings with links from Amazon and Flipkart. \
         Prefer this for any shopping question."
    }

    fn schema(&self) -> &Value {
        &PRODUCT_SEARCH_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: QueryArgs = serde_json::from_value(input)?;

        let amazon = self
            .search
            .organic(&format!("{} site:amazon.in", args.query), TOP_RESULTS)
            .await?;
        let flipkart = self
            .search
            .organic(&format!("{} site:flipkart.com", args.query), TOP_RESULTS)
            .await?;

        Ok(render_product_sections(&amazon, &flipkart))
    }
}

// --- Recharge plan search tool ---

static RECHARGE_PLANS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "Operator and budget, like 'Airtel prepaid under 500'"
            }
        },
        "required": ["query"]
    })
});

pub struct RechargePlanTool {
    search: SearchClient,
}

impl RechargePlanTool {
    pub fn new(search: SearchClient) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for RechargePlanTool {
    fn name(&self) -> &str {
        "recharge_plans"
    }

    fn description(&self) -> &str {
        "Fetches current prepaid recharge plans for telecom operators like Airtel, Jio or VI."
    }

    fn schema(&self) -> &Value {
        &RECHARGE_PLANS_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: QueryArgs = serde_json::from_value(input)?;
        let query = format!(
            "{} recharge plans site:paytm.com OR site:airtel.in OR site:jio.com",
            args.query
        );
        let hits = self.search.organic(&query, TOP_RESULTS).await?;
        if hits.is_empty() {
            return Ok("No current recharge plan data found.".to_string());
        }
        Ok(render_hits(&hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, link: &str, snippet: &str) -> OrganicHit {
        OrganicHit {
            title: title.to_string(),
            link: link.to_string(),
            snippet: snippet.to_string(),
        }
    }

    #[test]
    fn hits_render_title_snippet_link() {
        let hits = vec![hit(
            "Rust 1.80 released",
            "https://example.com/rust",
            "The release brings...",
        )];
        let text = render_hits(&hits);
        assert!(text.contains("Rust 1.80 released"));
        assert!(text.contains("The release brings..."));
        assert!(text.contains("https://example.com/rust"));
    }

    #[test]
    fn product_sections_keep_headings_when_both_empty() {
        let text = render_product_sections(&[], &[]);
        assert!(text.contains("Amazon results:"));
        assert!(text.contains("Flipkart results:"));
        assert!(!text.contains("http"));
    }

    #[test]
    fn product_sections_mix_full_and_empty_branch() {
        let amazon = vec![hit("boAt Airdopes", "https://amazon.in/x", "Earbuds...")];
        let text = render_product_sections(&amazon, &[]);
        assert!(text.contains("boAt Airdopes"));
        assert!(text.contains("Flipkart results:\nNo results found."));
    }

    #[tokio::test]
    async fn missing_key_degrades_to_not_configured() {
        let search = SearchClient::new(Client::new(), &Config::default());
        let err = search.organic("anything", 3).await.unwrap_err();
        assert!(matches!(err, LookupError::NotConfigured { .. }));
    }
}
