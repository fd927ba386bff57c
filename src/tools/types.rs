//! Types for the tool system
//!
//! This module defines the core types for the tool system including:
//! - Tool trait for implementing tools
//! - ToolError for error handling
//! - ToolDefinition in the MCP `tools/list` shape
//! - Argument helpers shared by the tool implementations

use crate::utils::LucidError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Arguments of a tool call, keyed by parameter name
pub type ToolArgs = HashMap<String, Value>;

/// Validates that a JSON value is a valid tool input schema
///
/// Basic validation: checks for required fields and structure
fn validate_json_schema(schema: &Value) -> Result<(), String> {
    let obj = schema
        .as_object()
        .ok_or_else(|| "Schema must be an object".to_string())?;

    let schema_type = obj
        .get("type")
        .ok_or_else(|| "Schema must have a 'type' field".to_string())?;
    if schema_type.as_str() != Some("object") {
        return Err("Schema type must be 'object' for tool parameters".to_string());
    }

    if let Some(props) = obj.get("properties") {
        if !props.is_object() {
            return Err("Schema 'properties' must be an object".to_string());
        }
    }

    if let Some(required) = obj.get("required") {
        if !required.is_array() {
            return Err("Schema 'required' must be an array".to_string());
        }
    }

    Ok(())
}

/// Validates arguments against a JSON schema
///
/// Basic validation: checks required fields are present
pub fn validate_args_against_schema(
    args: &ToolArgs,
    schema: &Value,
    tool_name: &str,
) -> ToolResult<()> {
    validate_json_schema(schema).map_err(|e| ToolError::ExecutionFailed {
        tool: tool_name.to_string(),
        message: format!("Invalid tool schema: {}", e),
    })?;

    let required = schema
        .get("required")
        .and_then(|r| r.as_array())
        .map(|r| r.iter().filter_map(|v| v.as_str()).collect::<Vec<_>>())
        .unwrap_or_default();

    for field_name in required {
        if !args.contains_key(field_name) {
            return Err(ToolError::InvalidArguments {
                tool: tool_name.to_string(),
                message: format!("Missing required parameter '{}'", field_name),
            });
        }
    }

    Ok(())
}

/// Error types for tool execution
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    /// Tool not found in registry
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Invalid arguments provided to tool
    #[error("Invalid arguments for tool '{tool}': {message}")]
    InvalidArguments { tool: String, message: String },

    /// Tool execution failed
    #[error("Tool '{tool}' execution failed: {message}")]
    ExecutionFailed { tool: String, message: String },
}

impl ToolError {
    pub fn invalid_arguments(tool: &str, message: impl Into<String>) -> Self {
        ToolError::InvalidArguments {
            tool: tool.to_string(),
            message: message.into(),
        }
    }

    /// Get the tool name from the error
    ///
    /// Returns "<unnamed>" when the name is empty.
    pub fn tool_name(&self) -> &str {
        let name = match self {
            ToolError::NotFound(name) => name.as_str(),
            ToolError::InvalidArguments { tool, .. } => tool.as_str(),
            ToolError::ExecutionFailed { tool, .. } => tool.as_str(),
        };

        if name.trim().is_empty() {
            "<unnamed>"
        } else {
            name
        }
    }
}

impl From<ToolError> for LucidError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(name) => LucidError::method_not_found(format!("Unknown tool: {}", name)),
            ToolError::InvalidArguments { message, .. } => LucidError::invalid_params(message),
            ToolError::ExecutionFailed { tool, message } => {
                LucidError::internal(format!("Tool '{}' failed: {}", tool, message))
            }
        }
    }
}

/// Result type for tool operations
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Definition of a tool as advertised by `tools/list`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Trait for implementing tools exposed by the server
///
/// Any type implementing this trait can be registered with the ToolRegistry.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of the tool
    fn name(&self) -> &str;

    /// Returns a description of what the tool does
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's parameters
    ///
    /// The returned schema MUST have `type: "object"` at the root level,
    /// a `properties` object and a `required` array.
    fn parameters(&self) -> Value;

    /// Executes the tool with the given arguments
    ///
    /// # Returns
    /// * `Ok(String)` - Markdown or plain text shown to the client
    /// * `Err(ToolError)` - If execution fails
    async fn execute(&self, args: ToolArgs) -> ToolResult<String>;

    fn to_tool_definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.parameters())
    }
}

/// Required string parameter. Empty strings are rejected.
pub fn required_str<'a>(args: &'a ToolArgs, key: &str, tool: &str) -> ToolResult<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            ToolError::invalid_arguments(
                tool,
                format!("Required parameter '{}' must be a string", key),
            )
        })
}

/// Optional string parameter. Non-string values count as absent.
pub fn optional_str<'a>(args: &'a ToolArgs, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

/// Optional boolean parameter. `null` counts as absent.
pub fn optional_bool(args: &ToolArgs, key: &str, tool: &str) -> ToolResult<Option<bool>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ToolError::invalid_arguments(
            tool,
            format!("Parameter '{}' must be a boolean", key),
        )),
    }
}
