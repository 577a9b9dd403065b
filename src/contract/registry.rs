// SPDX-License-Identifier: MIT

use crate::contract::tool::Tool;
use std::collections::HashMap;
use std::sync::Arc;

/// Static, ordered catalog of every available tool.
///
/// Built once at startup and never mutated afterwards, so it is safe to share
/// across threads and hand to the orchestrator for enumeration. Enumeration
/// order is insertion order; a duplicate name replaces the earlier entry.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn from_tools(tools: Vec<Arc<dyn Tool>>) -> Self {
        let mut registry = Self {
            tools: Vec::with_capacity(tools.len()),
            index: HashMap::with_capacity(tools.len()),
        };
        for tool in tools {
            let existing = registry.index.get(tool.name()).copied();
            match existing {
                Some(slot) => registry.tools[slot] = tool,
                None => {
                    registry
                        .index
                        .insert(tool.name().to_string(), registry.tools.len());
                    registry.tools.push(tool);
                }
            }
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&slot| self.tools[slot].clone())
    }

    /// Tools in catalog order, for enumeration by the orchestrator.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::error::LookupError;
    use async_trait::async_trait;
    use once_cell::sync::Lazy;
    use serde_json::{json, Value};

    static MOCK_SCHEMA: Lazy<Value> = Lazy::new(|| {
        json!({
            "type": "object",
            "properties": {}
        })
    });

    /// A mock tool for testing
    struct MockTool {
        name: String,
        description: String,
    }

    impl MockTool {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                description: format!("Mock tool: {}", name),
            }
        }
    }

    #[async_trait]
    impl Tool for MockTool {
        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> &str {
            &self.description
        }

        fn schema(&self) -> &Value {
            &MOCK_SCHEMA
        }

        async fn call(&self, _input: Value) -> Result<String, LookupError> {
            Ok("mock".to_string())
        }
    }

    #[test]
    fn build_and_lookup() {
        let registry = ToolRegistry::from_tools(vec![
            Arc::new(MockTool::new("tool1")),
            Arc::new(MockTool::new("tool2")),
        ]);

        assert_eq!(registry.len(), 2);
        assert!(registry.get("tool1").is_some());
        assert!(registry.get("tool2").is_some());
        assert!(registry.get("tool3").is_none());
    }

    #[test]
    fn enumeration_preserves_insertion_order() {
        let registry = ToolRegistry::from_tools(vec![
            Arc::new(MockTool::new("c")),
            Arc::new(MockTool::new("a")),
            Arc::new(MockTool::new("b")),
        ]);

        let names: Vec<&str> = registry.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn duplicate_name_replaces_in_place() {
        let registry = ToolRegistry::from_tools(vec![
            Arc::new(MockTool::new("same_name")),
            Arc::new(MockTool::new("other")),
            Arc::new(MockTool::new("same_name")),
        ]);

        assert_eq!(registry.len(), 2);
        let names: Vec<&str> = registry.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["same_name", "other"]);
    }

    #[test]
    fn empty_registry() {
        let registry = ToolRegistry::from_tools(vec![]);
        assert!(registry.is_empty());
        assert!(registry.get("anything").is_none());
    }
}
