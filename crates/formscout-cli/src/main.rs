//! CLI for detecting and matching form fields in screenshots.

mod commands;
mod ocr;
mod source;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, keys, label, scan};

/// Detect fillable fields in screenshots and map them to data keys
#[derive(Parser)]
#[command(name = "formscout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a single screenshot for form fields
    Scan(scan::ScanArgs),

    /// Scan multiple screenshots
    Batch(batch::BatchArgs),

    /// Resolve a single field label to a data key
    Match(label::MatchArgs),

    /// List the data-key vocabulary
    Keys(keys::KeysArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Scan(args) => scan::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Match(args) => label::run(args, cli.config.as_deref()).await,
        Commands::Keys(args) => keys::run(args).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
