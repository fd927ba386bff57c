pub mod analyze;
pub mod explore;
pub mod manage_state;
pub mod types;

pub use analyze::AnalyzeProblemTool;
pub use explore::CreativeExplorationTool;
pub use manage_state::ManageStateTool;
pub use types::{Tool, ToolArgs, ToolDefinition, ToolError, ToolResult};

use crate::session::{Payload, SessionStore};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Registry for managing available tools
///
/// Tools are kept ordered by name so `tools/list` is stable.
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Creates a registry with the three framework tools sharing `store`
    pub fn with_default_tools(store: SessionStore) -> ToolResult<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(AnalyzeProblemTool::new(store.clone())))?;
        registry.register(Box::new(CreativeExplorationTool::new(store.clone())))?;
        registry.register(Box::new(ManageStateTool::new(store)))?;
        Ok(registry)
    }

    /// Registers a tool in the registry
    ///
    /// # Errors
    /// Returns an error if a tool with the same name is already registered
    pub fn register(&mut self, tool: Box<dyn Tool>) -> ToolResult<()> {
        let name = tool.name().to_string();

        if self.tools.contains_key(&name) {
            return Err(ToolError::ExecutionFailed {
                tool: name.clone(),
                message: format!("Tool '{}' is already registered", name),
            });
        }

        self.tools.insert(name, tool);
        Ok(())
    }

    /// Retrieves a tool by name
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.to_tool_definition()).collect()
    }

    /// Looks up a tool, checks required arguments, then runs it.
    pub async fn execute(&self, name: &str, args: ToolArgs) -> ToolResult<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        types::validate_args_against_schema(&args, &tool.parameters(), name)?;

        debug!(tool = %name, arg_count = args.len(), "Executing tool");
        tool.execute(args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Merges `fields` into a session's payload and writes it back.
///
/// Does nothing while the store is disabled.
pub(crate) async fn record_in_session(
    store: &SessionStore,
    session_id: &str,
    fields: Vec<(&str, Value)>,
) {
    if !store.is_enabled().await {
        debug!(session_id = %session_id, "State disabled, result not recorded");
        return;
    }

    let mut data: Payload = store.get(session_id).await.unwrap_or_default();
    for (key, value) in fields {
        data.insert(key.to_string(), value);
    }
    store.set(session_id, data).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StoreConfig;
    use serde_json::json;

    struct EchoTool;

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes its input"
        }

        fn parameters(&self) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "input": { "type": "string" }
                },
                "required": ["input"]
            })
        }

        async fn execute(&self, args: ToolArgs) -> ToolResult<String> {
            let input = types::required_str(&args, "input", self.name())?;
            Ok(format!("Processed: {}", input))
        }
    }

    fn store() -> SessionStore {
        SessionStore::new(true, StoreConfig::default())
    }

    #[test]
    fn test_tool_registry_creation() {
        let registry = ToolRegistry::new();
        assert!(registry.definitions().is_empty());
        assert!(registry.get("echo").is_none());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        let result = registry.register(Box::new(EchoTool));

        assert!(result.is_err());
        assert_eq!(registry.definitions().len(), 1);
    }

    #[test]
    fn test_default_tools_sorted() {
        let registry = ToolRegistry::with_default_tools(store()).unwrap();
        let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec!["analyze_problem", "creative_exploration", "manage_state"]
        );
    }

    #[test]
    fn test_definitions_have_object_schemas() {
        let registry = ToolRegistry::with_default_tools(store()).unwrap();
        for def in registry.definitions() {
            assert_eq!(def.input_schema["type"], "object", "{}", def.name);
            assert!(def.input_schema["required"].is_array());
        }
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let registry = ToolRegistry::new();
        let result = registry.execute("missing", ToolArgs::new()).await;
        assert_eq!(result, Err(ToolError::NotFound("missing".to_string())));
    }

    #[tokio::test]
    async fn test_execute_checks_required_arguments() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();

        let result = registry.execute("echo", ToolArgs::new()).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments { .. })));

        let mut args = ToolArgs::new();
        args.insert("input".to_string(), json!("hello"));
        assert_eq!(registry.execute("echo", args).await.unwrap(), "Processed: hello");
    }

    #[tokio::test]
    async fn test_record_in_session_merges_fields() {
        let store = store();
        record_in_session(&store, "s1", vec![("analysis", json!("first"))]).await;
        record_in_session(&store, "s1", vec![("exploration", json!("second"))]).await;

        let data = store.get("s1").await.unwrap();
        assert_eq!(data["analysis"], json!("first"));
        assert_eq!(data["exploration"], json!("second"));
    }

    #[tokio::test]
    async fn test_record_in_session_skipped_when_disabled() {
        let store = SessionStore::new(false, StoreConfig::default());
        record_in_session(&store, "s1", vec![("analysis", json!("x"))]).await;
        assert_eq!(store.count().await, 0);
    }
}
