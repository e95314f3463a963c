//! Roadmap command implementation.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use waypoint_abstraction::RoadmapResult;
use waypoint_client::WaypointClient;

/// Tasks shown per phase before eliding; the parser itself keeps every task.
const MAX_DISPLAY_TASKS: usize = 8;

/// Execute the roadmap command.
pub async fn execute(client: &WaypointClient, file: &Path, json: bool) -> Result<()> {
    let summary = super::upload_summary(client, file).await?;

    let payload = client
        .generate_roadmap(&summary, super::print_status)
        .await
        .context("Roadmap generation failed")?;

    let result = waypoint_roadmap::build_result(&super::project_name(file), &payload);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_roadmap(&result);
    }
    Ok(())
}

fn print_roadmap(result: &RoadmapResult) {
    println!();
    println!("{}", format!("Roadmap: {}", result.project_name).bold());
    if !result.summary.is_empty() {
        println!("{}", result.summary.dimmed());
    }

    if result.phases.is_empty() {
        println!();
        println!("{}", "No phases could be extracted from the generated roadmap.".yellow());
        return;
    }

    for phase in &result.phases {
        println!();
        println!("{} {}", format!("Phase {}:", phase.id).green().bold(), phase.name.bold());
        println!("  {} {}", "Duration:".dimmed(), phase.duration);
        if !phase.objective.is_empty() {
            println!("  {} {}", "Objective:".dimmed(), phase.objective);
        }
        for task in phase.tasks.iter().take(MAX_DISPLAY_TASKS) {
            println!("    - {}", task);
        }
        if phase.tasks.len() > MAX_DISPLAY_TASKS {
            let hidden = phase.tasks.len() - MAX_DISPLAY_TASKS;
            println!("    {}", format!("(+{} more)", hidden).dimmed());
        }
    }
}
