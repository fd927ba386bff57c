//! Creative patterns: perspectives, concept connections and metaphors
//!
//! Everything here is drawn from fixed lists. Counts are capped at the list
//! sizes, never padded.

use crate::engine::framework::{
    Accessibility, Awareness, Content, KnowledgeCategory, StructuredPerspective,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Metaphor,
    Analogy,
    Reframing,
    Combination,
    Inversion,
}

impl ConnectionKind {
    const CYCLE: [ConnectionKind; 5] = [
        ConnectionKind::Metaphor,
        ConnectionKind::Analogy,
        ConnectionKind::Reframing,
        ConnectionKind::Combination,
        ConnectionKind::Inversion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionKind::Metaphor => "metaphor",
            ConnectionKind::Analogy => "analogy",
            ConnectionKind::Reframing => "reframing",
            ConnectionKind::Combination => "combination",
            ConnectionKind::Inversion => "inversion",
        }
    }

    /// Capitalized name used in headings
    pub fn title(&self) -> &'static str {
        match self {
            ConnectionKind::Metaphor => "Metaphor",
            ConnectionKind::Analogy => "Analogy",
            ConnectionKind::Reframing => "Reframing",
            ConnectionKind::Combination => "Combination",
            ConnectionKind::Inversion => "Inversion",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreativeConnection {
    pub kind: ConnectionKind,
    pub description: String,
    pub source: String,
    pub target: String,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreativePerspective {
    pub viewpoint: String,
    pub rationale: String,
    pub implications: Vec<String>,
    pub limiting_beliefs: Vec<String>,
    pub potential_outcomes: Vec<String>,
}

pub const PERSPECTIVE_PATTERNS: [&str; 5] = [
    "Inversion (What if the opposite were true?)",
    "First Principles (What are the fundamental truths?)",
    "Analogical (How is this like something else?)",
    "Systems Thinking (How do the parts interact?)",
    "Temporal Shift (How will this look in the future?)",
];

pub const METAPHORS: [&str; 5] = [
    "This problem is like a puzzle with missing pieces",
    "This situation resembles an ecosystem seeking balance",
    "The challenge is similar to navigating a maze with changing walls",
    "This process mirrors a chemical reaction needing a catalyst",
    "The situation is like a story with parallel plotlines",
];

#[derive(Debug, Clone, Default)]
pub struct CreativePatterns;

impl CreativePatterns {
    pub fn new() -> Self {
        Self
    }

    /// Up to `count` perspectives, one per pattern.
    pub fn generate_perspectives(&self, _input: &str, count: usize) -> Vec<CreativePerspective> {
        PERSPECTIVE_PATTERNS
            .iter()
            .take(count)
            .map(|pattern| {
                let lead = pattern.split(' ').next().unwrap_or(pattern);
                CreativePerspective {
                    viewpoint: pattern.to_string(),
                    rationale: format!("Perspective based on {} thinking", lead),
                    implications: Vec::new(),
                    limiting_beliefs: Vec::new(),
                    potential_outcomes: Vec::new(),
                }
            })
            .collect()
    }

    /// Pairs neighbouring concepts, wrapping around.
    ///
    /// Needs at least two concepts, and never yields more connections than
    /// there are distinct pairs.
    pub fn generate_connections(&self, concepts: &[String], count: usize) -> Vec<CreativeConnection> {
        let n = concepts.len();
        if n < 2 {
            return Vec::new();
        }

        let pairs = n * (n - 1) / 2;
        (0..count.min(pairs))
            .map(|i| {
                let source = &concepts[i % n];
                let target = &concepts[(i + 1) % n];
                let kind = ConnectionKind::CYCLE[i % ConnectionKind::CYCLE.len()];
                CreativeConnection {
                    kind,
                    description: format!("A {} between concepts", kind.as_str()),
                    source: source.clone(),
                    target: target.clone(),
                    insight: format!("Insight from connecting {} and {}", source, target),
                }
            })
            .collect()
    }

    /// Appends category insights to each perspective, keeping existing ones first.
    pub fn enhance_perspectives(
        &self,
        perspectives: Vec<StructuredPerspective>,
    ) -> Vec<StructuredPerspective> {
        perspectives
            .into_iter()
            .map(|mut perspective| {
                let extra = self.insights_for_category(&perspective.category);
                perspective.insights.extend(extra);
                perspective
            })
            .collect()
    }

    /// One quadrant insight (awareness × content) plus one accessibility insight.
    pub fn insights_for_category(&self, category: &KnowledgeCategory) -> Vec<String> {
        let dimension = category.dimension;

        let quadrant = match (dimension.awareness, dimension.content) {
            (Awareness::Known, Content::Known) => {
                "Consider how established information might be recontextualized"
            }
            (Awareness::Known, Content::Unknown) => {
                "Explore how identifying specific questions creates opportunities"
            }
            (Awareness::Unknown, Content::Known) => {
                "Investigate potential implicit knowledge that could be surfaced"
            }
            (Awareness::Unknown, Content::Unknown) => {
                "Consider what completely novel discoveries might transform understanding"
            }
        };

        let access = match dimension.accessibility {
            Accessibility::Knowable => "Explore methods to actively expand understanding in this area",
            Accessibility::Unknowable => {
                "Consider how acknowledging fundamental limits creates new perspectives"
            }
        };

        vec![quadrant.to_string(), access.to_string()]
    }

    pub fn generate_metaphors(&self, _input: &str, count: usize) -> Vec<String> {
        METAPHORS.iter().take(count).map(|m| m.to_string()).collect()
    }
}

/// Candidate concepts from a topic and its constraints.
///
/// Splits on spaces, keeps words longer than three characters, strips anything
/// that is not an ASCII word character, and de-duplicates in first-seen order.
pub fn extract_concepts(topic: &str, constraints: &[String]) -> Vec<String> {
    let joined = constraints.join(" ");
    let mut concepts: Vec<String> = Vec::new();

    for word in topic.split(' ').chain(joined.split(' ')) {
        if word.chars().count() <= 3 {
            continue;
        }
        let cleaned: String = word
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        if !cleaned.is_empty() && !concepts.contains(&cleaned) {
            concepts.push(cleaned);
        }
    }

    concepts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::framework::FrameworkCore;

    fn concepts(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_perspectives_capped_at_pattern_count() {
        let patterns = CreativePatterns::new();
        assert_eq!(patterns.generate_perspectives("t", 3).len(), 3);
        assert_eq!(patterns.generate_perspectives("t", 10).len(), 5);
        assert!(patterns.generate_perspectives("t", 0).is_empty());
    }

    #[test]
    fn test_perspective_rationale_uses_lead_word() {
        let perspectives = CreativePatterns::new().generate_perspectives("t", 4);
        assert_eq!(perspectives[0].rationale, "Perspective based on Inversion thinking");
        assert_eq!(perspectives[3].rationale, "Perspective based on Systems thinking");
    }

    #[test]
    fn test_connections_need_two_concepts() {
        let patterns = CreativePatterns::new();
        assert!(patterns.generate_connections(&[], 3).is_empty());
        assert!(patterns.generate_connections(&concepts(&["solo"]), 3).is_empty());
    }

    #[test]
    fn test_connections_limited_by_pair_count() {
        let patterns = CreativePatterns::new();
        let two = concepts(&["rivers", "cities"]);
        let connections = patterns.generate_connections(&two, 3);

        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].kind, ConnectionKind::Metaphor);
        assert_eq!(connections[0].source, "rivers");
        assert_eq!(connections[0].target, "cities");
    }

    #[test]
    fn test_connections_wrap_and_cycle_kinds() {
        let patterns = CreativePatterns::new();
        let three = concepts(&["alpha", "bravo", "charlie"]);
        let connections = patterns.generate_connections(&three, 3);

        assert_eq!(connections.len(), 3);
        assert_eq!(connections[1].kind, ConnectionKind::Analogy);
        assert_eq!(connections[2].kind, ConnectionKind::Reframing);
        assert_eq!(connections[2].source, "charlie");
        assert_eq!(connections[2].target, "alpha");
        assert_eq!(connections[2].description, "A reframing between concepts");
    }

    #[test]
    fn test_insights_for_category() {
        let patterns = CreativePatterns::new();
        let categories = FrameworkCore::new().map_knowledge_dimensions("x");

        let first = patterns.insights_for_category(&categories[0]);
        assert_eq!(first.len(), 2);
        assert!(first[0].contains("recontextualized"));
        assert!(first[1].contains("actively expand"));

        let last = patterns.insights_for_category(&categories[7]);
        assert!(last[0].contains("novel discoveries"));
        assert!(last[1].contains("fundamental limits"));
    }

    #[test]
    fn test_enhance_perspectives_appends() {
        let core = FrameworkCore::new();
        let categories = core.map_knowledge_dimensions("x");
        let mut perspectives = core.apply_structured_thinking("x", &categories);
        perspectives[0].insights.push("existing".to_string());

        let enhanced = CreativePatterns::new().enhance_perspectives(perspectives);

        assert_eq!(enhanced[0].insights.len(), 3);
        assert_eq!(enhanced[0].insights[0], "existing");
        assert_eq!(enhanced[1].insights.len(), 2);
    }

    #[test]
    fn test_metaphors_prefix() {
        let metaphors = CreativePatterns::new().generate_metaphors("x", 2);
        assert_eq!(metaphors.len(), 2);
        assert_eq!(metaphors[0], METAPHORS[0]);
    }

    #[test]
    fn test_extract_concepts() {
        let found = extract_concepts(
            "Urban transport, urban planning and cars",
            &["budget-limited".to_string(), "transport,".to_string()],
        );
        assert_eq!(
            found,
            vec!["Urban", "transport", "urban", "planning", "cars", "budgetlimited"]
        );
    }

    #[test]
    fn test_extract_concepts_short_words_dropped() {
        assert!(extract_concepts("a an the", &[]).is_empty());
        assert!(extract_concepts("", &[]).is_empty());
    }

    #[test]
    fn test_extract_concepts_length_checked_before_stripping() {
        // "!!!!" passes the length check but strips to nothing
        assert!(extract_concepts("!!!! ...?", &[]).is_empty());
        // "ab!!" passes the length check and keeps "ab"
        assert_eq!(extract_concepts("ab!!", &[]), vec!["ab"]);
    }
}
