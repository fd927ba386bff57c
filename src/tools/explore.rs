//! Creative exploration tool

use chrono::Utc;
use serde_json::{Value, json};

use crate::engine::{CreativePatterns, ExplorationResult, extract_concepts, format_exploration};
use crate::session::SessionStore;
use crate::tools::record_in_session;
use crate::tools::types::{Tool, ToolArgs, ToolResult, optional_bool, optional_str, required_str};

const DEFAULT_PERSPECTIVES: usize = 3;
const MAX_PERSPECTIVES: usize = 5;
const CONNECTION_COUNT: usize = 3;
const METAPHOR_COUNT: usize = 3;

const EXPLORATION_INSIGHTS: [&str; 3] = [
    "Consider combining elements from different perspectives to create hybrid solutions",
    "Look for patterns that emerge across the different viewpoints",
    "Challenge your initial assumptions about the constraints of the problem",
];

pub struct CreativeExplorationTool {
    store: SessionStore,
    patterns: CreativePatterns,
}

impl CreativeExplorationTool {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            patterns: CreativePatterns::new(),
        }
    }

    /// Builds the exploration for `topic` without touching session state.
    pub fn explore(
        &self,
        topic: &str,
        constraints: &[String],
        perspective_count: usize,
        include_metaphors: bool,
    ) -> ExplorationResult {
        let concepts = extract_concepts(topic, constraints);

        let metaphors = if include_metaphors {
            self.patterns.generate_metaphors(topic, METAPHOR_COUNT)
        } else {
            Vec::new()
        };

        ExplorationResult {
            perspectives: self.patterns.generate_perspectives(topic, perspective_count),
            connections: self.patterns.generate_connections(&concepts, CONNECTION_COUNT),
            metaphors,
            insights: EXPLORATION_INSIGHTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Array elements become strings; non-string elements keep their JSON text.
/// Anything other than an array means no constraints.
fn parse_constraints(args: &ToolArgs) -> Vec<String> {
    match args.get("constraints") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Numeric counts are clamped to `1..=5`, fractions round up.
fn parse_perspective_count(args: &ToolArgs) -> usize {
    match args.get("perspective_count").and_then(Value::as_f64) {
        Some(n) => n.clamp(1.0, MAX_PERSPECTIVES as f64).ceil() as usize,
        None => DEFAULT_PERSPECTIVES,
    }
}

#[async_trait::async_trait]
impl Tool for CreativeExplorationTool {
    fn name(&self) -> &str {
        "creative_exploration"
    }

    fn description(&self) -> &str {
        "Generate novel perspectives and connections for a topic"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "The topic or problem to explore creatively"
                },
                "constraints": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Optional constraints or parameters to consider"
                },
                "perspective_count": {
                    "type": "number",
                    "description": "Number of perspectives to generate",
                    "default": DEFAULT_PERSPECTIVES
                },
                "include_metaphors": {
                    "type": "boolean",
                    "description": "Whether to include metaphorical thinking",
                    "default": true
                },
                "session_id": {
                    "type": "string",
                    "description": "Optional session ID for maintaining state between calls"
                }
            },
            "required": ["topic"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> ToolResult<String> {
        let topic = required_str(&args, "topic", self.name())?;
        let constraints = parse_constraints(&args);
        let perspective_count = parse_perspective_count(&args);
        let include_metaphors = optional_bool(&args, "include_metaphors", self.name())?
            .unwrap_or(true);
        let session_id = optional_str(&args, "session_id");

        tracing::info!(
            topic_length = topic.len(),
            constraints = constraints.len(),
            perspectives = perspective_count,
            include_metaphors = include_metaphors,
            "Exploring topic"
        );

        let result = self.explore(topic, &constraints, perspective_count, include_metaphors);
        let exploration = format_exploration(&result);

        if let Some(session_id) = session_id {
            record_in_session(
                &self.store,
                session_id,
                vec![
                    ("exploration", json!(exploration)),
                    ("topic", json!(topic)),
                    ("timestamp", json!(Utc::now().to_rfc3339())),
                ],
            )
            .await;
        }

        Ok(exploration)
    }
}
