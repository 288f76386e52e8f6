//! Build-and-serve command.

use clap::Args;
use std::path::PathBuf;

use anyhow::{Context, Result};
use prevu_server::{ServerConfig, StaticServer};
use tokio::process::Command;

use crate::config::ConfigFile;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (defaults to config or 3000)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Output directory to serve (defaults to config or "dist")
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Serve the existing output directory without rebuilding
    #[arg(long)]
    pub skip_build: bool,

    /// Do not open browser
    #[arg(long)]
    pub no_open: bool,
}

/// Run the serve command.
pub async fn run(args: ServeArgs, config: ConfigFile) -> Result<()> {
    let out_dir = args.out_dir.unwrap_or(config.build.out_dir);
    let port = args.port.unwrap_or(config.serve.port);

    if args.skip_build {
        tracing::info!("Skipping build, serving {} as-is", out_dir.display());
    } else {
        run_build(&config.build.command).await?;
    }

    if !out_dir.exists() {
        anyhow::bail!(
            "Build output directory {} not found. Check the build command in prevu.toml.",
            out_dir.display()
        );
    }

    let server = StaticServer::plain(ServerConfig {
        root: out_dir,
        host: args.host,
        port,
        open_path: (!args.no_open).then(|| "/".to_string()),
    });

    server.start().await?;

    Ok(())
}

/// Run the external build command, blocking until it exits.
async fn run_build(command: &str) -> Result<()> {
    let (program, program_args) =
        split_command(command).context("Build command is empty")?;

    tracing::info!("Running build: {}", command);

    let status = Command::new(&program)
        .args(&program_args)
        .status()
        .await
        .with_context(|| format!("Failed to run build command '{}'", command))?;

    // A stale output directory from a previous run must not mask a failed
    // build, so the exit status is checked before any directory check.
    if !status.success() {
        anyhow::bail!("Build command '{}' failed with {}", command, status);
    }

    Ok(())
}

/// Split a build command on whitespace. Quoting is not supported; commands
/// that need it belong in a script the config points at.
fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}
