use crate::contract::error::LookupError;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for lookup capabilities callable by an external orchestrator.
///
/// # Optimization Notes
/// - `name()` and `description()` return `&str` to avoid allocation on every call
/// - `schema()` returns `&Value` to avoid cloning the schema on every access
/// - Implementations should store these values in struct fields
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool name (must be unique within the registry)
    fn name(&self) -> &str;

    /// Returns the selection description the orchestrator uses to pick this tool
    fn description(&self) -> &str;

    /// Returns the JSON schema for the tool's input parameters
    fn schema(&self) -> &Value;

    /// Run the lookup with a validated input object and return user-facing text.
    ///
    /// "No data found" is a successful reply phrased negatively, not an error.
    /// Errors carry the typed failure reason and are collapsed into text by
    /// the dispatcher, never shown to the orchestrator as raw errors.
    async fn call(&self, input: Value) -> Result<String, LookupError>;
}
