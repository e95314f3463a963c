//! Command implementations for the Waypoint CLI.

pub mod config_cmd;
pub mod feasibility;
pub mod roadmap;
pub mod summarize;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;
use waypoint_client::WaypointClient;

/// Prints one streamed status update.
pub(crate) fn print_status(message: &str, progress: Option<u8>) {
    match progress {
        Some(p) => println!("{} {} {}", "→".cyan(), message, format!("[{}%]", p).dimmed()),
        None => println!("{} {}", "→".cyan(), message),
    }
}

/// Uploads a document and returns its extracted summary text.
pub(crate) async fn upload_summary(client: &WaypointClient, file: &Path) -> Result<String> {
    println!("{} Uploading {}", "→".cyan(), file.display());

    let response = client
        .summarize_file(file)
        .await
        .context("Summarization request failed")?;

    if !response.success {
        bail!(
            "Summarization failed: {}",
            response.message.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    match response.summary {
        Some(summary) if !summary.trim().is_empty() => Ok(summary),
        _ => bail!("Service returned no summary for {}", file.display()),
    }
}

/// Project display name derived from the uploaded file.
pub(crate) fn project_name(file: &Path) -> String {
    file.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("project")
        .to_string()
}
