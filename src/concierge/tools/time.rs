// SPDX-License-Identifier: MIT

use crate::contract::error::LookupError;
use crate::contract::tool::Tool;
use async_trait::async_trait;
use chrono::Local;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

static CURRENT_TIME_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {}
    })
});

/// Pure local computation, no network.
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "current_time"
    }

    fn description(&self) -> &str {
        "Tells the current local time. Takes no input."
    }

    fn schema(&self) -> &Value {
        &CURRENT_TIME_SCHEMA
    }

    async fn call(&self, _input: Value) -> Result<String, LookupError> {
        Ok(Local::now().format("%I:%M %p").to_string())
    }
}
