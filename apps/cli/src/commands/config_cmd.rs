//! Config inspection command implementation.

use anyhow::Result;
use colored::Colorize;

use crate::config::WaypointConfig;
use crate::ConfigAction;

/// Execute the config command.
pub fn execute(action: &ConfigAction, config: &WaypointConfig, api_base: &str) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{} {}", "api_base:".bold(), api_base);
            println!(
                "{} {}",
                "log_level:".bold(),
                config.log_level.as_deref().unwrap_or("info")
            );
        }
        ConfigAction::Path => {
            println!("{} {}", "local:".bold(), WaypointConfig::default_local_path().display());
            println!("{} {}", "global:".bold(), WaypointConfig::default_global_path().display());
        }
    }
    Ok(())
}
