// SPDX-License-Identifier: MIT

//! The failure boundary between tools and the orchestrator.
//!
//! Every invocation yields exactly one [`ToolReply`]: unknown names, rejected
//! input, upstream failures, and missing configuration all come back as text
//! the orchestrator can relay. Nothing below this layer raises past it.

use crate::contract::registry::ToolRegistry;
use crate::contract::reply::ToolReply;
use crate::contract::schema;
use serde_json::Value;

pub struct Dispatcher {
    registry: ToolRegistry,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Invoke a tool by name. Single attempt, no retries; retrying across
    /// turns is the orchestrator's call.
    pub async fn invoke(&self, tool_name: &str, input: Value) -> ToolReply {
        let Some(tool) = self.registry.get(tool_name) else {
            log::warn!("Tool {} not found", tool_name);
            return ToolReply::unknown_tool(tool_name);
        };

        let input = match schema::validate(tool.schema(), input) {
            Ok(input) => input,
            Err(e) => {
                log::warn!("Tool {} rejected input: {}", tool_name, e);
                return ToolReply::from_error(e);
            }
        };

        log::info!("Tool call: {} {}", tool_name, input);
        match tool.call(input).await {
            Ok(text) => ToolReply::answer(text),
            Err(e) => {
                log::error!("Tool {} failed: {}", tool_name, e);
                ToolReply::from_error(e)
            }
        }
    }
}
