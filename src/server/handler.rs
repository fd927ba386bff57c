//! Request dispatch for the MCP server

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::server::protocol::{
    DEFAULT_PROTOCOL_VERSION, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
};
use crate::server::resources;
use crate::session::SessionStore;
use crate::tools::{ToolArgs, ToolRegistry};
use crate::utils::{LucidError, Result};

pub const SERVER_NAME: &str = "DeepLucid3D";

/// Owns the tool registry and a handle to the shared session store.
pub struct McpServer {
    registry: ToolRegistry,
    store: SessionStore,
}

impl McpServer {
    pub fn new(store: SessionStore) -> Result<Self> {
        let registry = ToolRegistry::with_default_tools(store.clone())?;
        Ok(Self { registry, store })
    }

    /// Handles one line of input.
    ///
    /// Returns the serialized response, or `None` for notifications.
    pub async fn handle_message(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(line) {
            Ok(message) => self.handle_value(message).await?,
            Err(e) => {
                warn!(error = %e, "Failed to parse message");
                JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(e))
            }
        };

        match serde_json::to_string(&response) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "Failed to serialize response");
                None
            }
        }
    }

    async fn handle_value(&self, message: Value) -> Option<JsonRpcResponse> {
        // messages without an id are notifications
        let id = match message.get("id") {
            Some(id) => id.clone(),
            None => {
                if let Some(method) = message.get("method").and_then(Value::as_str) {
                    debug!(method = %method, "Notification received");
                }
                return None;
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_request(format!("Invalid request: {}", e)),
                ));
            }
        };

        debug!(method = %request.method, "Request received");

        let response = match self.dispatch(&request).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => {
                let severity = err.severity();
                let recoverable = err.is_recoverable();
                if severity == tracing::Level::ERROR {
                    tracing::error!(
                        method = %request.method,
                        error = %err,
                        recoverable,
                        "Request failed"
                    );
                } else if severity == tracing::Level::WARN {
                    warn!(
                        method = %request.method,
                        error = %err,
                        recoverable,
                        "Request failed"
                    );
                } else {
                    debug!(method = %request.method, error = %err, "Request rejected");
                }
                JsonRpcResponse::failure(id, (&err).into())
            }
        };
        Some(response)
    }

    async fn dispatch(&self, request: &JsonRpcRequest) -> Result<Value> {
        match request.method.as_str() {
            "initialize" => Ok(self.initialize(request)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.definitions() })),
            "tools/call" => self.call_tool(request).await,
            "resources/list" => Ok(json!({ "resources": resources::list_resources() })),
            "resources/templates/list" => {
                Ok(json!({ "resourceTemplates": resources::list_templates() }))
            }
            "resources/read" => self.read_resource(request).await,
            other => Err(LucidError::method_not_found(format!(
                "Method not found: {}",
                other
            ))),
        }
    }

    fn initialize(&self, request: &JsonRpcRequest) -> Value {
        let protocol_version = request
            .params_object()
            .get("protocolVersion")
            .cloned()
            .unwrap_or_else(|| json!(DEFAULT_PROTOCOL_VERSION));

        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {},
                "resources": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    async fn call_tool(&self, request: &JsonRpcRequest) -> Result<Value> {
        let params = request.params_object();
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| LucidError::invalid_params("Tool name must be a string"))?;

        let args: ToolArgs = match params.get("arguments") {
            Some(Value::Object(map)) => map.clone().into_iter().collect(),
            None | Some(Value::Null) => ToolArgs::new(),
            Some(_) => return Err(LucidError::invalid_params("Tool arguments must be an object")),
        };

        let text = self.registry.execute(name, args).await?;

        Ok(json!({
            "content": [{ "type": "text", "text": text }]
        }))
    }

    async fn read_resource(&self, request: &JsonRpcRequest) -> Result<Value> {
        let params = request.params_object();
        let uri = params
            .get("uri")
            .and_then(Value::as_str)
            .ok_or_else(|| LucidError::invalid_params("Resource uri must be a string"))?;

        let contents = resources::read_resource(&self.store, uri).await?;
        Ok(json!({ "contents": [contents] }))
    }
}
