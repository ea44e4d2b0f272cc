//! Config command - inspect and initialize configuration.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use formscout_core::models::config::ScoutConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the active configuration
    Show,

    /// Write a default config file
    Init {
        /// Destination path (default: user config directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = super::scan::load_config(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Init { path } => {
            let dest = path.unwrap_or_else(default_config_path);
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            ScoutConfig::default().save(&dest)?;
            println!(
                "{} Config written to {}",
                style("✓").green(),
                dest.display()
            );
        }
    }
    Ok(())
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("formscout")
        .join("config.json")
}
