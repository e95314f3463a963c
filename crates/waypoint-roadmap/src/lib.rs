//! Roadmap text parsing for Waypoint.
//!
//! Turns the freeform markdown-ish roadmap text from a terminal generation
//! payload into an ordered, duration-annotated [`Phase`] list. The parser is
//! tolerant by design: the upstream generator's format drifts, so a strict
//! rule grammar is backed by a coarse segment splitter, and genuinely
//! unstructured text yields an empty list rather than an error.

pub mod duration;
pub mod parser;

pub use duration::{annotate, estimate};
pub use parser::{clean_task_text, parse_roadmap};

use waypoint_abstraction::{CompletePayload, Phase, RoadmapResult};

/// Builds a complete [`RoadmapResult`] from a terminal generation payload.
///
/// Parses the payload's roadmap text, annotates durations over the final
/// assembled phases, and attaches the best available summary. An empty or
/// unstructured roadmap produces an empty phase list, which callers decide
/// how to present.
pub fn build_result(project_name: &str, payload: &CompletePayload) -> RoadmapResult {
    let mut phases: Vec<Phase> = parse_roadmap(payload.roadmap.as_deref().unwrap_or_default());
    annotate(&mut phases);

    RoadmapResult {
        project_name: project_name.to_string(),
        phases,
        summary: payload.summary().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_example() {
        let text = "### 1. Prototype Development\n\
            **Objective:** Build a working prototype\n\
            * *Action 1a:* Source components\n\
            * *Action 1b:* Assemble and test\n";

        let payload = CompletePayload {
            success: true,
            roadmap: Some(text.to_string()),
            refined_summary: Some("A prototype plan".to_string()),
            ..Default::default()
        };

        let result = build_result("widget-paper", &payload);

        assert_eq!(result.project_name, "widget-paper");
        assert_eq!(result.summary, "A prototype plan");
        assert_eq!(result.phases.len(), 1);

        let phase = &result.phases[0];
        assert_eq!(phase.id, 1);
        assert_eq!(phase.name, "Prototype Development");
        assert_eq!(phase.objective, "Build a working prototype");
        assert_eq!(phase.tasks, vec!["Source components", "Assemble and test"]);
        // Two tasks, not more than five: the smaller development bucket.
        assert_eq!(phase.duration, "4-6 weeks");
    }

    #[test]
    fn test_missing_roadmap_text_yields_empty_phases() {
        let payload = CompletePayload { success: true, ..Default::default() };
        let result = build_result("project", &payload);
        assert!(result.phases.is_empty());
        assert_eq!(result.summary, "");
    }
}
