//! Layered parser from freeform roadmap text to structured phases.
//!
//! The generator's output format is not contractually fixed, so parsing is
//! deliberately layered: strict line rules first (precise for the common
//! case), generic heuristics next (catch minor format drift), and a coarse
//! segment splitter as a last resort. Non-empty input only ever produces an
//! empty phase list when the text is genuinely unstructured.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use waypoint_abstraction::Phase;

/// Tasks at or below this many characters are formatting fragments, not tasks.
const MIN_TASK_CHARS: usize = 15;

/// Minimum length for a prose line to be considered a task by the fallback rule.
const FALLBACK_MIN_CHARS: usize = 20;

static SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^### (\d+)\.\s*(.+)$").expect("section regex should be valid")
});

static ACTION_BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\*\s+\*Action \d+[a-z]:\*\s*(.+)$").expect("action regex should be valid")
});

static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\s+(.+)$").expect("bullet regex should be valid"));

static SUB_BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s+\*\s+\*(.+?):\*\s*(.+)$").expect("sub-bullet regex should be valid")
});

static LABEL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Objective|Goal|Target):").expect("label regex should be valid")
});

static BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(As an expert|This roadmap|Objective)").expect("boilerplate regex should be valid")
});

static SEGMENT_SPLIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\n+#{0,3}\s*\d+\.?\s*").expect("segment regex should be valid")
});

static LEADING_BULLETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*+\s*").expect("bullet-strip regex should be valid"));

/// Parses freeform roadmap text into an ordered phase list.
///
/// The primary line-rule grammar runs first; when it finds no numbered
/// section headings at all, the coarse segment splitter takes over. Both
/// empty is a valid outcome for unstructured text.
pub fn parse_roadmap(text: &str) -> Vec<Phase> {
    let phases = parse_sections(text);
    if phases.is_empty() {
        debug!("Primary grammar found no phases, trying segment splitter");
        parse_segments(text)
    } else {
        phases
    }
}

/// Primary grammar: an ordered rule cascade over non-blank lines with a
/// mutable current-phase accumulator. First matching rule wins the line.
fn parse_sections(text: &str) -> Vec<Phase> {
    let mut phases = Vec::new();
    let mut current: Option<Phase> = None;
    let mut next_id: u32 = 1;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Numbered section heading starts a new phase.
        if let Some(caps) = SECTION.captures(trimmed) {
            if let Some(phase) = current.take() {
                phases.push(phase);
            }
            current = Some(Phase::new(next_id, caps[2].trim()));
            next_id += 1;
            continue;
        }

        // Everything below needs a phase to attach to.
        let Some(phase) = current.as_mut() else {
            continue;
        };

        // Objective label.
        if let Some(rest) = trimmed.strip_prefix("**Objective:**") {
            phase.objective = rest.trim().to_string();
            continue;
        }

        // Labeled action bullet: `* *Action 1a:* Source components`.
        if let Some(caps) = ACTION_BULLET.captures(trimmed) {
            phase.tasks.push(caps[1].to_string());
            continue;
        }

        // Generic bullet. Consumes the line even when the text is too short
        // to keep, so short fragments never fall through to later rules.
        if !trimmed.contains("Action") {
            if let Some(caps) = BULLET.captures(trimmed) {
                let task = &caps[1];
                if task.chars().count() > MIN_TASK_CHARS && !LABEL_PREFIX.is_match(task) {
                    phase.tasks.push(task.to_string());
                }
                continue;
            }
        }

        // Nested labeled sub-bullet; indentation matters, so match the raw line.
        if let Some(caps) = SUB_BULLET.captures(line) {
            phase.tasks.push(format!("{}: {}", &caps[1], &caps[2]));
            continue;
        }

        // Fallback: prose lines long enough to be tasks, minus headings,
        // rules, emphasis blocks, and boilerplate openers.
        if trimmed.chars().count() > FALLBACK_MIN_CHARS
            && !trimmed.starts_with("**")
            && !trimmed.starts_with("---")
            && !trimmed.starts_with('#')
            && !BOILERPLATE.is_match(trimmed)
        {
            let clean = clean_task_text(trimmed);
            if clean.chars().count() > MIN_TASK_CHARS {
                phase.tasks.push(clean);
            }
        }
    }

    if let Some(phase) = current.take() {
        phases.push(phase);
    }
    phases
}

/// Secondary grammar: split on blank line(s) followed by an optionally
/// heading-marked number, one phase per segment after the first.
fn parse_segments(text: &str) -> Vec<Phase> {
    let mut phases = Vec::new();

    for (index, segment) in SEGMENT_SPLIT.split(text).enumerate() {
        if index == 0 || segment.trim().is_empty() {
            continue;
        }

        let mut lines = segment.lines().filter(|line| !line.trim().is_empty());
        let Some(first) = lines.next() else {
            continue;
        };

        let name = first.trim().replace('*', "").replace('#', "").trim().to_string();
        let name = if name.is_empty() { format!("Phase {}", index) } else { name };

        let tasks: Vec<String> = lines
            .map(str::trim)
            .filter(|line| line.chars().count() > MIN_TASK_CHARS)
            .map(clean_task_text)
            .collect();

        let mut phase = Phase::new(index as u32, name);
        phase.tasks = tasks;
        phases.push(phase);
    }

    phases
}

/// Strips leading bullet glyphs and bold markers from a task line.
///
/// Interior punctuation is preserved; only `**` pairs and the leading `*`
/// run are formatting.
pub fn clean_task_text(line: &str) -> String {
    LEADING_BULLETS.replace(line, "").replace("**", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "\
### 1. Prototype Development
**Objective:** Build a working prototype
* *Action 1a:* Source components
* *Action 1b:* Assemble and test

### 2. Testing & Validation
**Objective:** Prove the prototype works
* Run the full validation suite on hardware
* Collect field feedback from pilot users
";

    #[test]
    fn test_primary_grammar_well_formed() {
        let phases = parse_roadmap(WELL_FORMED);
        assert_eq!(phases.len(), 2);

        assert_eq!(phases[0].id, 1);
        assert_eq!(phases[0].name, "Prototype Development");
        assert_eq!(phases[0].objective, "Build a working prototype");
        assert_eq!(phases[0].tasks, vec!["Source components", "Assemble and test"]);

        assert_eq!(phases[1].id, 2);
        assert_eq!(phases[1].name, "Testing & Validation");
        assert_eq!(
            phases[1].tasks,
            vec![
                "Run the full validation suite on hardware",
                "Collect field feedback from pilot users"
            ]
        );
    }

    #[test]
    fn test_phase_ids_are_contiguous() {
        let text = "### 1. One\n* A meaningful task line here\n\
            ### 2. Two\n* Another meaningful task here\n\
            ### 3. Three\n* Third meaningful task line\n";
        let phases = parse_roadmap(text);
        let ids: Vec<u32> = phases.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_short_bullet_fragments_are_filtered() {
        let text = "### 1. Development\n* Short\n* This task is long enough to keep\n";
        let phases = parse_roadmap(text);
        assert_eq!(phases[0].tasks, vec!["This task is long enough to keep"]);
    }

    #[test]
    fn test_restated_labels_are_not_tasks() {
        let text = "### 1. Development\n* Objective: restated objective that is long\n* A genuinely meaningful task line\n";
        let phases = parse_roadmap(text);
        assert_eq!(phases[0].tasks, vec!["A genuinely meaningful task line"]);
    }

    #[test]
    fn test_nested_labeled_sub_bullet() {
        let text = "### 1. Development\n  * *Action Items:* follow up with suppliers\n";
        let phases = parse_roadmap(text);
        assert_eq!(phases[0].tasks, vec!["Action Items: follow up with suppliers"]);
    }

    #[test]
    fn test_fallback_rule_cleans_prose_lines() {
        let text = "### 1. Development\n**Secure supplier agreements** before the quarter ends\n";
        let phases = parse_roadmap(text);
        // Starts with ** so the fallback rejects it outright.
        assert!(phases[0].tasks.is_empty());

        let text = "### 1. Development\n*Negotiate supplier agreements before quarter end\n";
        let phases = parse_roadmap(text);
        assert_eq!(phases[0].tasks, vec!["Negotiate supplier agreements before quarter end"]);
    }

    #[test]
    fn test_bullet_containing_action_falls_through_to_cleanup() {
        // Not the strict `*Action 1a:*` form, so the generic bullet rule
        // refuses it and the fallback strips the bullet glyph instead.
        let text = "### 1. Development\n* Action plan review with the full team\n";
        let phases = parse_roadmap(text);
        assert_eq!(phases[0].tasks, vec!["Action plan review with the full team"]);
    }

    #[test]
    fn test_boilerplate_openers_are_skipped() {
        let text = "### 1. Development\n\
            As an expert I recommend proceeding with caution here\n\
            This roadmap outlines the steps needed for your project\n\
            Procure the long-lead components early in the quarter\n";
        let phases = parse_roadmap(text);
        assert_eq!(phases[0].tasks, vec!["Procure the long-lead components early in the quarter"]);
    }

    #[test]
    fn test_content_before_first_heading_is_ignored() {
        let text = "Some meaningful preamble line that is quite long\n\
            ### 1. Development\n* A genuinely meaningful task line\n";
        let phases = parse_roadmap(text);
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].tasks, vec!["A genuinely meaningful task line"]);
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let tasks = [
            "Source components",
            "Negotiate supplier agreements before quarter end",
            "Action Items: follow up with suppliers",
        ];
        for task in tasks {
            let once = clean_task_text(task);
            assert_eq!(once, task, "already-clean text must pass through unchanged");
            assert_eq!(clean_task_text(&once), once);
        }
    }

    #[test]
    fn test_cleanup_preserves_interior_punctuation() {
        assert_eq!(
            clean_task_text("** Review specs: sections 1.2, 3.4 (draft!)"),
            "Review specs: sections 1.2, 3.4 (draft!)"
        );
        assert_eq!(
            clean_task_text("* Review specs: sections 1.2, 3.4 (draft!)"),
            "Review specs: sections 1.2, 3.4 (draft!)"
        );
    }

    #[test]
    fn test_fallback_guarantee_for_numbered_segments() {
        // No "### N." headings at all, but blank-line-delimited numbered
        // segments: the secondary grammar must still find phases.
        let text = "An introduction paragraph about the project.\n\n\
            1. Initial Research\nSurvey the existing literature thoroughly\nIdentify gaps worth pursuing further\n\n\
            2. Prototype Build\nAssemble the first working prototype unit\n";
        let phases = parse_roadmap(text);
        assert!(phases.len() >= 2);
        assert_eq!(phases[0].name, "Initial Research");
        assert_eq!(
            phases[0].tasks,
            vec![
                "Survey the existing literature thoroughly",
                "Identify gaps worth pursuing further"
            ]
        );
        assert_eq!(phases[1].name, "Prototype Build");
    }

    #[test]
    fn test_secondary_grammar_strips_markers_from_names() {
        let text = "Intro.\n\n## 1. **Bold Phase Name**\nA task line that is long enough here\n";
        let phases = parse_roadmap(text);
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].name, "Bold Phase Name");
    }

    #[test]
    fn test_secondary_grammar_is_uncapped() {
        // Task-count limits are a presentation concern; the parser keeps all.
        let tasks: Vec<String> = (0..12)
            .map(|i| format!("Meaningful standalone task number {:02}", i))
            .collect();
        let text = format!("Intro.\n\n1. Big Phase\n{}\n", tasks.join("\n"));
        let phases = parse_roadmap(&text);
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].tasks.len(), 12);
    }

    #[test]
    fn test_unstructured_text_yields_empty_list() {
        let phases = parse_roadmap("Just a single paragraph with no structure at all.");
        assert!(phases.is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        assert!(parse_roadmap("").is_empty());
    }
}
