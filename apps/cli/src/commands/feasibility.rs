//! Feasibility command implementation.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use waypoint_client::WaypointClient;

/// Execute the feasibility command.
pub async fn execute(client: &WaypointClient, file: &Path, json: bool) -> Result<()> {
    let summary = super::upload_summary(client, file).await?;

    let payload = client
        .generate_feasibility(&summary, super::print_status)
        .await
        .context("Feasibility assessment failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!();
    println!("{}", format!("Feasibility: {}", super::project_name(file)).bold());
    if let Some(message) = &payload.message {
        println!("{}", message);
    }
    let assessment = payload.summary();
    if !assessment.is_empty() {
        println!();
        println!("{}", assessment);
    }
    Ok(())
}
