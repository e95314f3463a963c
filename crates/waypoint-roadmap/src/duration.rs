//! Keyword-table duration estimation for parsed phases.

use waypoint_abstraction::Phase;

/// Estimates a duration for a phase from its name and task count.
///
/// Case-insensitive substring match against the name; the first matching
/// keyword pair wins. Phases matching nothing fall into buckets by task
/// count alone. Deterministic and pure.
pub fn estimate(name: &str, task_count: usize) -> &'static str {
    let name = name.to_lowercase();

    if name.contains("prototype") || name.contains("development") {
        if task_count > 5 { "6-8 weeks" } else { "4-6 weeks" }
    } else if name.contains("testing") || name.contains("validation") {
        if task_count > 4 { "4-6 weeks" } else { "2-4 weeks" }
    } else if name.contains("funding") || name.contains("grant") {
        "3-6 months"
    } else if name.contains("manufacturing") || name.contains("implementation") {
        "8-12 weeks"
    } else if name.contains("marketing") || name.contains("promotion") {
        "6-10 weeks"
    } else if name.contains("launch") || name.contains("deployment") {
        "4-8 weeks"
    } else if name.contains("maintenance") || name.contains("iteration") {
        "Ongoing"
    } else if name.contains("scaling") || name.contains("expansion") {
        "6-12 months"
    } else if task_count > 6 {
        "6-10 weeks"
    } else if task_count > 3 {
        "3-6 weeks"
    } else {
        "2-4 weeks"
    }
}

/// Assigns a duration estimate to each assembled phase.
///
/// Runs once over the final phase list; only the name and task count are
/// consulted, never the objective text.
pub fn annotate(phases: &mut [Phase]) {
    for phase in phases {
        phase.duration = estimate(&phase.name, phase.tasks.len()).to_string();
    }
}
