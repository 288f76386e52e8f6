//! Prevu CLI - local preview servers for web front-end projects.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use commands::preview::PreviewArgs;
use commands::serve::ServeArgs;

#[derive(Parser)]
#[command(name = "prevu")]
#[command(about = "Local preview servers for web front-end projects")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to prevu.toml config file
    #[arg(short, long, default_value = "prevu.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the project and serve its output directory
    Serve(ServeArgs),

    /// Serve a generated diagnostic page without building
    Preview(PreviewArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let config = config::load(&cli.config)?;

    // Execute command
    match cli.command {
        Commands::Serve(args) => {
            commands::serve::run(args, config).await?;
        }
        Commands::Preview(args) => {
            commands::preview::run(args, config).await?;
        }
    }

    Ok(())
}
