//! Integration tests for the tool contract layer.
//!
//! These drive the dispatcher end to end with mock tools, verifying the
//! failure boundary, input validation, and catalog behavior.

use async_trait::async_trait;
use concierge_rs::concierge::config::Config;
use concierge_rs::concierge::tools::build_registry;
use concierge_rs::contract::dispatch::Dispatcher;
use concierge_rs::contract::error::LookupError;
use concierge_rs::contract::registry::ToolRegistry;
use concierge_rs::contract::reply::ReplyKind;
use concierge_rs::contract::tool::Tool;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Mock Components
// ============================================================================

static FREE_TEXT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "query": {"type": "string"}
        },
        "required": ["query"]
    })
});

static STRUCTURED_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "train_number": {"type": "string"},
            "start_day": {"type": "string", "default": "1"}
        },
        "required": ["train_number"]
    })
});

/// Behavior of a mock invocation
enum MockBehavior {
    /// Echo the validated input back as text
    EchoInput,
    /// Return a fixed answer
    Answer(String),
    /// Fail with the given error
    Fail(fn() -> LookupError),
}

/// Mock tool recording how often it was called
struct MockTool {
    name: String,
    schema: &'static Value,
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockTool {
    fn new(name: &str, schema: &'static Value, behavior: MockBehavior) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            schema,
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Tool for MockTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Mock tool"
    }

    fn schema(&self) -> &Value {
        self.schema
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::EchoInput => Ok(input.to_string()),
            MockBehavior::Answer(text) => Ok(text.clone()),
            MockBehavior::Fail(make) => Err(make()),
        }
    }
}

fn dispatcher_with(tools: Vec<Arc<MockTool>>) -> Dispatcher {
    let tools: Vec<Arc<dyn Tool>> = tools.into_iter().map(|t| t as Arc<dyn Tool>).collect();
    Dispatcher::new(ToolRegistry::from_tools(tools))
}

// ============================================================================
// Failure Boundary Tests
// ============================================================================

#[tokio::test]
async fn unknown_tool_is_a_reply_not_an_error() {
    let dispatcher = dispatcher_with(vec![]);

    let reply = dispatcher.invoke("teleport", json!({})).await;

    assert!(!reply.ok);
    assert_eq!(reply.kind, ReplyKind::UnknownTool);
    assert!(reply.text.contains("teleport"));
}

#[tokio::test]
async fn upstream_failure_becomes_ok_text() {
    let failing = MockTool::new("lookup", &FREE_TEXT_SCHEMA, MockBehavior::Fail(|| {
        LookupError::upstream("quote", "connection reset")
    }));
    let dispatcher = dispatcher_with(vec![failing]);

    let reply = dispatcher.invoke("lookup", json!("TSLA")).await;

    // Deliberate policy: the orchestrator always gets relayable text.
    assert!(reply.ok);
    assert_eq!(reply.kind, ReplyKind::Upstream);
    assert!(!reply.text.is_empty());
}

#[tokio::test]
async fn not_configured_becomes_ok_text_naming_capability() {
    let unconfigured = MockTool::new("lookup", &FREE_TEXT_SCHEMA, MockBehavior::Fail(|| {
        LookupError::not_configured("flight status")
    }));
    let dispatcher = dispatcher_with(vec![unconfigured]);

    let reply = dispatcher.invoke("lookup", json!("AI101")).await;

    assert!(reply.ok);
    assert_eq!(reply.kind, ReplyKind::NotConfigured);
    assert!(reply.text.contains("flight status"));
    assert!(!reply.text.contains("AVIATIONSTACK"));
}

#[tokio::test]
async fn unconfigured_and_upstream_are_distinguishable_by_kind() {
    let unconfigured = MockTool::new("a", &FREE_TEXT_SCHEMA, MockBehavior::Fail(|| {
        LookupError::not_configured("weather")
    }));
    let failing = MockTool::new("b", &FREE_TEXT_SCHEMA, MockBehavior::Fail(|| {
        LookupError::upstream("weather", "timeout")
    }));
    let dispatcher = dispatcher_with(vec![unconfigured, failing]);

    let first = dispatcher.invoke("a", json!("x")).await;
    let second = dispatcher.invoke("b", json!("x")).await;

    assert_ne!(first.kind, second.kind);
    assert!(first.ok && second.ok);
}

// ============================================================================
// Input Validation Tests
// ============================================================================

#[tokio::test]
async fn missing_required_field_rejected_before_tool_runs() {
    let tool = MockTool::new("train", &STRUCTURED_SCHEMA, MockBehavior::EchoInput);
    let dispatcher = dispatcher_with(vec![tool.clone()]);

    let reply = dispatcher.invoke("train", json!({"start_day": "2"})).await;

    assert!(!reply.ok);
    assert_eq!(reply.kind, ReplyKind::InvalidInput);
    assert!(reply.text.contains("train_number"));
    assert_eq!(tool.call_count(), 0);
}

#[tokio::test]
async fn declared_default_applied_before_dispatch() {
    let tool = MockTool::new("train", &STRUCTURED_SCHEMA, MockBehavior::EchoInput);
    let dispatcher = dispatcher_with(vec![tool.clone()]);

    let reply = dispatcher
        .invoke("train", json!({"train_number": "12951"}))
        .await;

    assert!(reply.ok);
    assert!(reply.text.contains("\"start_day\":\"1\""));
    assert_eq!(tool.call_count(), 1);
}

#[tokio::test]
async fn free_text_coerced_into_single_string_property() {
    let tool = MockTool::new("searcher", &FREE_TEXT_SCHEMA, MockBehavior::EchoInput);
    let dispatcher = dispatcher_with(vec![tool]);

    let reply = dispatcher
        .invoke("searcher", json!("latest cricket score"))
        .await;

    assert!(reply.ok);
    assert!(reply.text.contains("latest cricket score"));
}

#[tokio::test]
async fn successful_call_is_an_answer() {
    let tool = MockTool::new(
        "greeter",
        &FREE_TEXT_SCHEMA,
        MockBehavior::Answer("No flight found for that code.".to_string()),
    );
    let dispatcher = dispatcher_with(vec![tool]);

    let reply = dispatcher.invoke("greeter", json!("UA246")).await;

    // "No data found" is an answer, not a failure.
    assert!(reply.ok);
    assert_eq!(reply.kind, ReplyKind::Answer);
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[test]
fn full_catalog_has_all_fourteen_tools_in_order() {
    let registry = build_registry(&Config::default());

    let names: Vec<&str> = registry.iter().map(|t| t.name()).collect();
    assert_eq!(
        names,
        vec![
            "current_time",
            "wikipedia",
            "web_search",
            "stock_price",
            "weather",
            "currency_converter",
            "video_search",
            "product_search",
            "holiday_lookup",
            "train_status",
            "pnr_status",
            "flight_status",
            "fd_rates",
            "recharge_plans",
        ]
    );
}

#[test]
fn every_tool_has_a_description_and_schema() {
    let registry = build_registry(&Config::default());

    for tool in registry.iter() {
        assert!(!tool.description().is_empty(), "{} lacks description", tool.name());
        assert!(tool.schema().is_object(), "{} lacks schema", tool.name());
    }
}

// ============================================================================
// End-to-End Degradation Tests (no credentials, no network)
// ============================================================================

#[tokio::test]
async fn unconfigured_currency_tool_still_validates_format_first() {
    let dispatcher = Dispatcher::new(build_registry(&Config::default()));

    let reply = dispatcher
        .invoke("currency_converter", json!("convert my money please"))
        .await;

    // Malformed input beats the missing key: no network call either way.
    assert!(!reply.ok);
    assert_eq!(reply.kind, ReplyKind::InvalidInput);
    assert!(reply.text.contains("100 USD to INR"));
}

#[tokio::test]
async fn unconfigured_rail_tool_degrades_to_not_configured() {
    let dispatcher = Dispatcher::new(build_registry(&Config::default()));

    let reply = dispatcher
        .invoke("train_status", json!({"train_number": "12951"}))
        .await;

    assert!(reply.ok);
    assert_eq!(reply.kind, ReplyKind::NotConfigured);
}

#[tokio::test]
async fn bad_pnr_rejected_without_network() {
    let dispatcher = Dispatcher::new(build_registry(&Config::default()));

    let reply = dispatcher.invoke("pnr_status", json!("12345")).await;

    assert!(!reply.ok);
    assert_eq!(reply.kind, ReplyKind::InvalidInput);
    assert!(reply.text.contains("10 digits"));
}

#[tokio::test]
async fn holiday_lookup_answers_locally() {
    let dispatcher = Dispatcher::new(build_registry(&Config::default()));

    let reply = dispatcher
        .invoke("holiday_lookup", json!("is today a holiday?"))
        .await;

    assert!(reply.ok);
    assert_eq!(reply.kind, ReplyKind::Answer);
    assert!(reply.text.contains("Today is"));
}

#[tokio::test]
async fn current_time_answers_locally() {
    let dispatcher = Dispatcher::new(build_registry(&Config::default()));

    let reply = dispatcher.invoke("current_time", json!("")).await;

    assert!(reply.ok);
    assert!(reply.text.ends_with("AM") || reply.text.ends_with("PM"));
}
