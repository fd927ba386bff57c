//! Markdown rendering for analyses and explorations

use crate::engine::creative::{CreativeConnection, CreativePerspective};
use crate::engine::framework::{Analysis, KnowledgeCategory};

/// Output of a creative exploration, ready to render
#[derive(Debug, Clone, Default)]
pub struct ExplorationResult {
    pub perspectives: Vec<CreativePerspective>,
    pub connections: Vec<CreativeConnection>,
    pub metaphors: Vec<String>,
    pub insights: Vec<String>,
}

fn section(title: &str, content: &str) -> String {
    format!("## {}\n\n{}\n\n", title, content)
}

fn bullets<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_category(category: &KnowledgeCategory, insights: Option<&[String]>) -> String {
    let mut out = format!(
        "### {}\n**Description:** {}\n",
        category.label, category.description
    );

    if category.examples.is_empty() {
        out.push_str("*No specific examples identified.*");
    } else {
        out.push_str("**Examples:**\n");
        out.push_str(&bullets(&category.examples));
    }

    if let Some(insights) = insights.filter(|i| !i.is_empty()) {
        out.push_str("\n**Creative Insights:**\n");
        out.push_str(&bullets(insights));
    }

    out
}

/// Renders a framework analysis.
///
/// With `detailed`, each knowledge category also lists the insights attached
/// to its structured perspective.
pub fn format_analysis(
    analysis: &Analysis,
    creative_perspectives: &[CreativePerspective],
    detailed: bool,
) -> String {
    let mut result = String::new();

    let state = &analysis.cognitive_state;
    result.push_str(&section(
        "Cognitive State Assessment",
        &format!(
            "Current cognitive state: **{}**\n\n{}\n\n**Characteristics:**\n{}",
            state.kind.label(),
            state.description,
            bullets(&state.characteristics[..])
        ),
    ));

    let categories = analysis
        .knowledge_mapping
        .iter()
        .map(|category| {
            let insights = if detailed {
                analysis
                    .structured_perspectives
                    .iter()
                    .find(|p| p.category.dimension == category.dimension)
                    .map(|p| p.insights.as_slice())
            } else {
                None
            };
            format_category(category, insights)
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    result.push_str(&section(
        "Knowledge Dimension Mapping",
        &format!(
            "The problem space has been mapped across the following knowledge dimensions:\n\n{}",
            categories
        ),
    ));

    let questions = analysis
        .recursive_questions
        .iter()
        .map(|q| {
            format!(
                "### {}\n**Purpose:** {}\n**Target Area:** {}",
                q.question, q.purpose, q.target_area
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    result.push_str(&section(
        "Recursive Self-Questioning",
        &format!(
            "The following questions challenge initial assumptions and perspectives:\n\n{}",
            questions
        ),
    ));

    if !creative_perspectives.is_empty() {
        let perspectives = creative_perspectives
            .iter()
            .map(|p| {
                let mut out = format!("### {}\n**Rationale:** {}\n", p.viewpoint, p.rationale);
                if !p.implications.is_empty() {
                    out.push_str("**Implications:**\n");
                    out.push_str(&bullets(&p.implications));
                }
                if !p.potential_outcomes.is_empty() {
                    out.push_str("\n\n**Potential Outcomes:**\n");
                    out.push_str(&bullets(&p.potential_outcomes));
                }
                out
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        result.push_str(&section(
            "Creative Perspectives",
            &format!(
                "These alternative viewpoints open new possibilities:\n\n{}",
                perspectives
            ),
        ));
    }

    let synthesis = &analysis.synthesis;
    let insights = if synthesis.insights.is_empty() {
        "- *Analysis indicates further exploration needed to generate specific insights.*"
            .to_string()
    } else {
        bullets(&synthesis.insights)
    };
    let uncertainties = if synthesis.uncertainties.is_empty() {
        "- *No specific uncertainties identified.*".to_string()
    } else {
        bullets(&synthesis.uncertainties)
    };
    result.push_str(&section(
        "Synthesis & Integration",
        &format!(
            "**Key Insights:**\n{}\n\n**Confidence Level:** {:.0}%\n\n**Uncertainties:**\n{}",
            insights,
            synthesis.confidence_level * 100.0,
            uncertainties
        ),
    ));

    result
}

/// Renders a creative exploration. Empty parts are left out entirely.
pub fn format_exploration(result: &ExplorationResult) -> String {
    let mut output = String::new();

    if !result.perspectives.is_empty() {
        let body = result
            .perspectives
            .iter()
            .map(|p| {
                let mut out = format!("### {}\n**Rationale:** {}\n", p.viewpoint, p.rationale);
                if !p.implications.is_empty() {
                    out.push_str("**Implications:**\n");
                    out.push_str(&bullets(&p.implications));
                }
                if !p.limiting_beliefs.is_empty() {
                    out.push_str("\n\n**Limiting Beliefs to Challenge:**\n");
                    out.push_str(&bullets(&p.limiting_beliefs));
                }
                if !p.potential_outcomes.is_empty() {
                    out.push_str("\n\n**Potential Outcomes:**\n");
                    out.push_str(&bullets(&p.potential_outcomes));
                }
                out
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        output.push_str(&section("Alternative Perspectives", &body));
    }

    if !result.connections.is_empty() {
        let body = result
            .connections
            .iter()
            .map(|c| {
                format!(
                    "### {}: {} ↔ {}\n{}\n\n**Insight:** {}",
                    c.kind.title(),
                    c.source,
                    c.target,
                    c.description,
                    c.insight
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        output.push_str(&section("Creative Connections", &body));
    }

    if !result.metaphors.is_empty() {
        output.push_str(&section(
            "Metaphorical Thinking",
            &format!(
                "Consider these metaphors to spark new insights:\n\n{}",
                bullets(&result.metaphors)
            ),
        ));
    }

    if !result.insights.is_empty() {
        output.push_str(&section("Key Insights", &bullets(&result.insights)));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::creative::CreativePatterns;
    use crate::engine::framework::FrameworkCore;

    #[test]
    fn test_format_analysis_sections_in_order() {
        let analysis = FrameworkCore::new().process("problem");
        let perspectives = CreativePatterns::new().generate_perspectives("problem", 3);
        let text = format_analysis(&analysis, &perspectives, false);

        let order = [
            "## Cognitive State Assessment",
            "## Knowledge Dimension Mapping",
            "## Recursive Self-Questioning",
            "## Creative Perspectives",
            "## Synthesis & Integration",
        ];
        let mut last = 0;
        for heading in order {
            let pos = text.find(heading).unwrap();
            assert!(pos >= last, "{} out of order", heading);
            last = pos;
        }

        assert!(text.contains("Current cognitive state: **Approaching Lucidity**"));
        assert!(text.contains("**Confidence Level:** 80%"));
        assert!(text.contains("*No specific examples identified.*"));
        assert!(!text.contains("**Creative Insights:**"));
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn test_format_analysis_without_perspectives() {
        let analysis = FrameworkCore::new().process("problem");
        let text = format_analysis(&analysis, &[], false);
        assert!(!text.contains("## Creative Perspectives"));
    }

    #[test]
    fn test_format_analysis_detailed_lists_insights() {
        let core = FrameworkCore::new();
        let mut analysis = core.process("problem");
        analysis.structured_perspectives =
            CreativePatterns::new().enhance_perspectives(analysis.structured_perspectives);

        let text = format_analysis(&analysis, &[], true);
        assert_eq!(text.matches("**Creative Insights:**").count(), 8);
        assert!(text.contains("- Consider how established information might be recontextualized"));
    }

    #[test]
    fn test_format_exploration_connection_heading() {
        let patterns = CreativePatterns::new();
        let concepts = vec!["rivers".to_string(), "cities".to_string()];
        let result = ExplorationResult {
            connections: patterns.generate_connections(&concepts, 3),
            ..Default::default()
        };

        let text = format_exploration(&result);
        assert!(text.starts_with("## Creative Connections"));
        assert!(text.contains("### Metaphor: rivers ↔ cities"));
        assert!(text.contains("**Insight:** Insight from connecting rivers and cities"));
    }

    #[test]
    fn test_format_exploration_empty() {
        assert_eq!(format_exploration(&ExplorationResult::default()), "");
    }
}
