//! Framework reference documents and per-session result resources

use serde::Serialize;
use serde_json::Value;

use crate::session::SessionStore;
use crate::utils::{LucidError, Result};

pub const MARKDOWN: &str = "text/markdown";

const SESSION_PREFIX: &str = "ucpf://session/";

struct StaticResource {
    uri: &'static str,
    name: &'static str,
    description: &'static str,
    text: &'static str,
}

const STATIC_RESOURCES: [StaticResource; 3] = [
    StaticResource {
        uri: "ucpf://framework/overview",
        name: "UCPF Framework Overview",
        description: "An overview of the Unified Cognitive Processing Framework",
        text: include_str!("content/overview.md"),
    },
    StaticResource {
        uri: "ucpf://framework/cognitive-states",
        name: "Cognitive States Guide",
        description: "Guide to the cognitive states in the UCPF framework",
        text: include_str!("content/cognitive_states.md"),
    },
    StaticResource {
        uri: "ucpf://framework/knowledge-dimensions",
        name: "Knowledge Dimensions Reference",
        description: "Reference for the knowledge dimensions in the UCPF framework",
        text: include_str!("content/knowledge_dimensions.md"),
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceInfo {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplate {
    pub uri_template: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

/// Stored result kinds that can be read back per session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionField {
    Analysis,
    Exploration,
}

impl SessionField {
    const ALL: [SessionField; 2] = [SessionField::Analysis, SessionField::Exploration];

    /// Payload key, also the last URI segment
    pub fn key(&self) -> &'static str {
        match self {
            SessionField::Analysis => "analysis",
            SessionField::Exploration => "exploration",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == segment)
    }
}

/// Splits `ucpf://session/{id}/{field}` into its parts.
///
/// The id must be non-empty and contain no `/`.
pub fn parse_session_uri(uri: &str) -> Option<(&str, SessionField)> {
    let rest = uri.strip_prefix(SESSION_PREFIX)?;
    let (id, segment) = rest.split_once('/')?;
    if id.is_empty() {
        return None;
    }
    SessionField::from_segment(segment).map(|field| (id, field))
}

pub fn list_resources() -> Vec<ResourceInfo> {
    STATIC_RESOURCES
        .iter()
        .map(|r| ResourceInfo {
            uri: r.uri.to_string(),
            name: r.name.to_string(),
            description: r.description.to_string(),
            mime_type: MARKDOWN.to_string(),
        })
        .collect()
}

pub fn list_templates() -> Vec<ResourceTemplate> {
    vec![
        ResourceTemplate {
            uri_template: format!("{}{{sessionId}}/analysis", SESSION_PREFIX),
            name: "Session Analysis".to_string(),
            description: "Analysis results for a specific session".to_string(),
            mime_type: MARKDOWN.to_string(),
        },
        ResourceTemplate {
            uri_template: format!("{}{{sessionId}}/exploration", SESSION_PREFIX),
            name: "Session Exploration".to_string(),
            description: "Creative exploration results for a specific session".to_string(),
            mime_type: MARKDOWN.to_string(),
        },
    ]
}

/// Resolves a resource URI to its Markdown contents.
///
/// Session resources read through the store, so a successful read refreshes
/// the session.
pub async fn read_resource(store: &SessionStore, uri: &str) -> Result<ResourceContents> {
    if let Some(resource) = STATIC_RESOURCES.iter().find(|r| r.uri == uri) {
        return Ok(contents(uri, resource.text.to_string()));
    }

    let Some((session_id, field)) = parse_session_uri(uri) else {
        return Err(LucidError::invalid_request(format!("Resource not found: {}", uri)));
    };

    if !store.has(session_id).await {
        return Err(LucidError::invalid_request(format!(
            "No session found with ID: {}",
            session_id
        )));
    }

    let text = store
        .get(session_id)
        .await
        .and_then(|data| match data.get(field.key()) {
            Some(Value::String(text)) => Some(text.clone()),
            _ => None,
        })
        .ok_or_else(|| {
            LucidError::invalid_request(format!(
                "No {} data found for session: {}",
                field.key(),
                session_id
            ))
        })?;

    Ok(contents(uri, text))
}

fn contents(uri: &str, text: String) -> ResourceContents {
    ResourceContents {
        uri: uri.to_string(),
        mime_type: MARKDOWN.to_string(),
        text,
    }
}
