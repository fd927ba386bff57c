//! State management tool
//!
//! Toggles the session store, resets sessions and reports status.

use serde_json::{Value, json};

use crate::session::SessionStore;
use crate::tools::types::{Tool, ToolArgs, ToolError, ToolResult, optional_str, required_str};

pub struct ManageStateTool {
    store: SessionStore,
}

impl ManageStateTool {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    async fn status(&self, session_id: Option<&str>) -> String {
        let enabled = self.store.is_enabled().await;
        let count = self.store.count().await;

        let mut text = format!(
            "State management is currently {}\nNumber of active sessions: {}",
            if enabled { "enabled" } else { "disabled" },
            count
        );
        if let Some(id) = session_id {
            let found = self.store.has(id).await;
            text.push_str(&format!(
                "\nSession '{}': {}",
                id,
                if found { "exists" } else { "not found" }
            ));
        }
        text
    }
}

#[async_trait::async_trait]
impl Tool for ManageStateTool {
    fn name(&self) -> &str {
        "manage_state"
    }

    fn description(&self) -> &str {
        "Control the state management for UCPF processing"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": ["enable", "disable", "reset", "status"],
                    "description": "The state management action to perform"
                },
                "session_id": {
                    "type": "string",
                    "description": "Optional session ID to target a specific session"
                }
            },
            "required": ["action"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> ToolResult<String> {
        let action = required_str(&args, "action", self.name())?;
        let session_id = optional_str(&args, "session_id");

        tracing::info!(action = %action, session_id = ?session_id, "Managing state");

        let text = match action {
            "enable" => {
                self.store.set_enabled(true).await;
                "State management has been enabled".to_string()
            }
            "disable" => {
                self.store.set_enabled(false).await;
                "State management has been disabled".to_string()
            }
            "reset" => match session_id {
                Some(id) => {
                    if self.store.clear(id).await {
                        format!("Session '{}' has been reset", id)
                    } else {
                        format!("Session '{}' was not found", id)
                    }
                }
                None => {
                    self.store.clear_all().await;
                    "All sessions have been reset".to_string()
                }
            },
            "status" => self.status(session_id).await,
            other => {
                return Err(ToolError::invalid_arguments(
                    self.name(),
                    format!("Invalid action: {}", other),
                ));
            }
        };

        Ok(text)
    }
}
