//! Analyze problem tool
//!
//! Runs a problem statement through the full framework and renders the result
//! as Markdown. With a session id and state enabled, the rendered analysis is
//! kept in the session so it can be read back as a resource.

use chrono::Utc;
use serde_json::{Value, json};

use crate::engine::{CreativePatterns, FrameworkCore, format_analysis};
use crate::session::SessionStore;
use crate::tools::record_in_session;
use crate::tools::types::{Tool, ToolArgs, ToolResult, optional_bool, optional_str, required_str};

/// Number of creative perspectives attached to every analysis
const ANALYSIS_PERSPECTIVES: usize = 3;

pub struct AnalyzeProblemTool {
    store: SessionStore,
    core: FrameworkCore,
    patterns: CreativePatterns,
}

impl AnalyzeProblemTool {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            core: FrameworkCore::new(),
            patterns: CreativePatterns::new(),
        }
    }

    /// Builds the Markdown analysis without touching session state.
    pub fn render(&self, problem: &str, detailed: bool) -> String {
        let mut analysis = self.core.process(problem);
        if detailed {
            analysis.structured_perspectives = self
                .patterns
                .enhance_perspectives(analysis.structured_perspectives);
        }
        let perspectives = self
            .patterns
            .generate_perspectives(problem, ANALYSIS_PERSPECTIVES);

        format_analysis(&analysis, &perspectives, detailed)
    }
}

#[async_trait::async_trait]
impl Tool for AnalyzeProblemTool {
    fn name(&self) -> &str {
        "analyze_problem"
    }

    fn description(&self) -> &str {
        "Process a problem statement through the full UCPF framework"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "problem": {
                    "type": "string",
                    "description": "The problem statement to analyze"
                },
                "session_id": {
                    "type": "string",
                    "description": "Optional session ID for maintaining state between calls"
                },
                "enable_state": {
                    "type": "boolean",
                    "description": "Whether to enable state management for this analysis. Omit to keep the current setting",
                    "default": false
                },
                "detailed": {
                    "type": "boolean",
                    "description": "Whether to include detailed analysis",
                    "default": false
                }
            },
            "required": ["problem"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> ToolResult<String> {
        let problem = required_str(&args, "problem", self.name())?;
        let session_id = optional_str(&args, "session_id");
        let enable_state = optional_bool(&args, "enable_state", self.name())?;
        let detailed = optional_bool(&args, "detailed", self.name())?.unwrap_or(false);

        if let Some(enabled) = enable_state {
            self.store.set_enabled(enabled).await;
        }

        tracing::info!(
            problem_length = problem.len(),
            detailed = detailed,
            has_session = session_id.is_some(),
            "Analyzing problem"
        );

        let analysis = self.render(problem, detailed);

        if let Some(session_id) = session_id {
            record_in_session(
                &self.store,
                session_id,
                vec![
                    ("analysis", json!(analysis)),
                    ("problem", json!(problem)),
                    ("timestamp", json!(Utc::now().to_rfc3339())),
                ],
            )
            .await;
        }

        Ok(analysis)
    }
}
