//! Waypoint CLI - Command-line interface for the Waypoint research assistant
//!
//! This CLI provides a `way` command for turning research documents into
//! AI-generated implementation roadmaps and feasibility reports.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use waypoint_client::WaypointClient;

/// Waypoint CLI - research documents in, implementation roadmaps out
#[derive(Parser, Debug)]
#[command(
    name = "way",
    author,
    version,
    about = "Waypoint - turn research documents into implementation roadmaps",
    long_about = "Waypoint (way) uploads a research document to the generation service,\nstreams generation progress, and renders the result as a structured,\nduration-annotated implementation roadmap."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Generation service base URL (overrides WAYPOINT_API_BASE)
    #[arg(short, long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a document and print its extracted summary
    Summarize {
        /// Path to the document (PDF, DOCX, or plain text)
        file: PathBuf,
    },

    /// Generate an implementation roadmap from a document
    ///
    /// Uploads the document, streams generation progress, and renders the
    /// parsed phase list with duration estimates.
    Roadmap {
        /// Path to the document (PDF, DOCX, or plain text)
        file: PathBuf,

        /// Output the parsed roadmap as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a feasibility report from a document
    Feasibility {
        /// Path to the document (PDF, DOCX, or plain text)
        file: PathBuf,

        /// Output the raw result payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect resolved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved configuration values
    Show,
    /// Print the configuration file search paths
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let file_config = config::WaypointConfig::discover_and_load();

    // Initialize tracing
    let level_name = args
        .log_level
        .as_deref()
        .or(file_config.log_level.as_deref())
        .unwrap_or("info");
    let level = match level_name {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber =
        FmtSubscriber::builder().with_max_level(level).without_time().with_target(false).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let api_base = args
        .api_base
        .clone()
        .unwrap_or_else(|| file_config.api_base().to_string());
    let client = WaypointClient::new(&api_base);

    match args.command {
        Command::Summarize { file } => commands::summarize::execute(&client, &file).await,
        Command::Roadmap { file, json } => commands::roadmap::execute(&client, &file, json).await,
        Command::Feasibility { file, json } => {
            commands::feasibility::execute(&client, &file, json).await
        }
        Command::Config { action } => commands::config_cmd::execute(&action, &file_config, &api_base),
    }
}
