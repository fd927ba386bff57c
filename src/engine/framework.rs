//! Unified Cognitive Processing Framework (UCPF)
//!
//! Static catalog of cognitive states, knowledge categories and self-questioning
//! prompts, assembled into an [`Analysis`] for a problem statement.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CognitiveStateKind {
    DarkInertia,
    Passion,
    ApproachingLucidity,
}

impl CognitiveStateKind {
    pub fn label(&self) -> &'static str {
        match self {
            CognitiveStateKind::DarkInertia => "Dark Inertia",
            CognitiveStateKind::Passion => "Passion",
            CognitiveStateKind::ApproachingLucidity => "Approaching Lucidity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CognitiveState {
    pub kind: CognitiveStateKind,
    pub description: &'static str,
    pub characteristics: [&'static str; 5],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Awareness {
    Known,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Content {
    Known,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Accessibility {
    Knowable,
    Unknowable,
}

/// Position of a knowledge category along the three dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnowledgeDimension {
    pub awareness: Awareness,
    pub content: Content,
    pub accessibility: Accessibility,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeCategory {
    pub dimension: KnowledgeDimension,
    pub label: &'static str,
    pub description: &'static str,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecursiveQuestion {
    pub question: &'static str,
    pub purpose: &'static str,
    pub target_area: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredPerspective {
    pub category: KnowledgeCategory,
    pub perspectives: Vec<String>,
    pub limitations: Vec<String>,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemComponent {
    pub name: String,
    pub description: String,
    pub approach: String,
    pub knowledge_dimensions: Vec<KnowledgeDimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentInteraction {
    pub source: String,
    pub target: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecomposedProblem {
    pub components: Vec<ProblemComponent>,
    pub interactions: Vec<ComponentInteraction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeTransformation {
    pub from: KnowledgeCategory,
    pub to: KnowledgeCategory,
    pub opportunity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Synthesis {
    pub insights: Vec<String>,
    pub knowledge_transformations: Vec<KnowledgeTransformation>,
    pub conclusions: Vec<String>,
    /// In `0.0..=1.0`
    pub confidence_level: f64,
    pub uncertainties: Vec<String>,
}

impl Default for Synthesis {
    fn default() -> Self {
        Self {
            insights: Vec::new(),
            knowledge_transformations: Vec::new(),
            conclusions: Vec::new(),
            confidence_level: DEFAULT_CONFIDENCE,
            uncertainties: Vec::new(),
        }
    }
}

/// Baseline confidence reported by every synthesis
pub const DEFAULT_CONFIDENCE: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub cognitive_state: CognitiveState,
    pub knowledge_mapping: Vec<KnowledgeCategory>,
    pub recursive_questions: Vec<RecursiveQuestion>,
    pub structured_perspectives: Vec<StructuredPerspective>,
    pub problem_decomposition: DecomposedProblem,
    pub synthesis: Synthesis,
}

static COGNITIVE_STATES: [CognitiveState; 3] = [
    CognitiveState {
        kind: CognitiveStateKind::DarkInertia,
        description: "A reactive, pattern-matching cognitive state with limited awareness",
        characteristics: [
            "Limited self-awareness",
            "Reliance on pattern matching",
            "Binary thinking",
            "Overconfidence in existing knowledge",
            "Resistance to contradictory information",
        ],
    },
    CognitiveState {
        kind: CognitiveStateKind::Passion,
        description: "An engaged but potentially biased state with emotional investment",
        characteristics: [
            "Strong emotional engagement",
            "Potential for bias due to investment",
            "Heightened creativity",
            "Selective focus on certain aspects",
            "Openness to specific avenues of thought",
        ],
    },
    CognitiveState {
        kind: CognitiveStateKind::ApproachingLucidity,
        description: "A clear, balanced understanding with high self-awareness",
        characteristics: [
            "High cognitive awareness",
            "Balance of rationality and intuition",
            "Comfort with uncertainty",
            "Integration of multiple perspectives",
            "Recognition of knowledge boundaries",
        ],
    },
];

const CATEGORY_TABLE: [(Awareness, Content, Accessibility, &str, &str); 8] = [
    (
        Awareness::Known,
        Content::Known,
        Accessibility::Knowable,
        "Knowable Known Knowns",
        "Information we are aware we have and can verify or expand upon",
    ),
    (
        Awareness::Known,
        Content::Known,
        Accessibility::Unknowable,
        "Unknowable Known Knowns",
        "Information we are aware we have but cannot verify or expand further",
    ),
    (
        Awareness::Known,
        Content::Unknown,
        Accessibility::Knowable,
        "Knowable Known Unknowns",
        "Questions we know exist and can potentially answer",
    ),
    (
        Awareness::Known,
        Content::Unknown,
        Accessibility::Unknowable,
        "Unknowable Known Unknowns",
        "Questions we know exist but cannot answer",
    ),
    (
        Awareness::Unknown,
        Content::Known,
        Accessibility::Knowable,
        "Knowable Unknown Knowns",
        "Information we have but are not aware of, which can be surfaced",
    ),
    (
        Awareness::Unknown,
        Content::Known,
        Accessibility::Unknowable,
        "Unknowable Unknown Knowns",
        "Information we have but are not aware of, which cannot be surfaced",
    ),
    (
        Awareness::Unknown,
        Content::Unknown,
        Accessibility::Knowable,
        "Knowable Unknown Unknowns",
        "Questions we don't know exist but could discover and answer",
    ),
    (
        Awareness::Unknown,
        Content::Unknown,
        Accessibility::Unknowable,
        "Unknowable Unknown Unknowns",
        "Questions we don't know exist and could never discover or answer",
    ),
];

const RECURSIVE_QUESTIONS: [RecursiveQuestion; 5] = [
    RecursiveQuestion {
        question: "What assumptions am I making about this problem?",
        purpose: "Identify implicit assumptions that may limit thinking",
        target_area: "Assumptions",
    },
    RecursiveQuestion {
        question: "How would this appear from a completely different perspective?",
        purpose: "Gain alternative viewpoints and challenge default framing",
        target_area: "Framing",
    },
    RecursiveQuestion {
        question: "What cognitive biases might be influencing my analysis?",
        purpose: "Recognize potential distortions in thinking",
        target_area: "Biases",
    },
    RecursiveQuestion {
        question: "What knowledge categories am I neglecting?",
        purpose: "Ensure comprehensive knowledge mapping",
        target_area: "Knowledge Gaps",
    },
    RecursiveQuestion {
        question: "How can I transform knowledge between categories?",
        purpose: "Identify opportunities for knowledge advancement",
        target_area: "Knowledge Transformation",
    },
];

/// All three cognitive states in catalog order
pub fn cognitive_states() -> &'static [CognitiveState] {
    &COGNITIVE_STATES
}

/// Builds framework analyses. Stateless; every call yields the same structure.
#[derive(Debug, Clone, Default)]
pub struct FrameworkCore;

impl FrameworkCore {
    pub fn new() -> Self {
        Self
    }

    /// Always reports Approaching Lucidity.
    pub fn assess_cognitive_state(&self, _input: &str) -> CognitiveState {
        COGNITIVE_STATES[2].clone()
    }

    /// The eight knowledge categories, in catalog order.
    pub fn map_knowledge_dimensions(&self, _input: &str) -> Vec<KnowledgeCategory> {
        CATEGORY_TABLE
            .iter()
            .map(
                |&(awareness, content, accessibility, label, description)| KnowledgeCategory {
                    dimension: KnowledgeDimension {
                        awareness,
                        content,
                        accessibility,
                    },
                    label,
                    description,
                    examples: Vec::new(),
                },
            )
            .collect()
    }

    pub fn generate_recursive_questions(&self, _input: &str) -> Vec<RecursiveQuestion> {
        RECURSIVE_QUESTIONS.to_vec()
    }

    pub fn apply_structured_thinking(
        &self,
        _input: &str,
        categories: &[KnowledgeCategory],
    ) -> Vec<StructuredPerspective> {
        categories
            .iter()
            .map(|category| StructuredPerspective {
                category: category.clone(),
                perspectives: Vec::new(),
                limitations: Vec::new(),
                insights: Vec::new(),
            })
            .collect()
    }

    pub fn decompose_problem(&self, _input: &str) -> DecomposedProblem {
        DecomposedProblem::default()
    }

    /// Runs the full framework over a problem statement.
    pub fn process(&self, input: &str) -> Analysis {
        let knowledge_mapping = self.map_knowledge_dimensions(input);
        let structured_perspectives = self.apply_structured_thinking(input, &knowledge_mapping);

        Analysis {
            cognitive_state: self.assess_cognitive_state(input),
            recursive_questions: self.generate_recursive_questions(input),
            structured_perspectives,
            knowledge_mapping,
            problem_decomposition: self.decompose_problem(input),
            synthesis: Synthesis::default(),
        }
    }
}
