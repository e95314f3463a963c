//! Summarize command implementation.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use waypoint_client::WaypointClient;

/// Execute the summarize command.
pub async fn execute(client: &WaypointClient, file: &Path) -> Result<()> {
    let summary = super::upload_summary(client, file).await?;

    println!();
    println!("{}", "Summary".bold());
    println!("{}", summary);
    Ok(())
}
