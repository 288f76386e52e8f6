//! Static preview command.

use clap::Args;
use std::path::PathBuf;

use anyhow::{Context, Result};
use prevu_server::{write_preview_page, ServerConfig, StaticServer, PREVIEW_PAGE};

use crate::config::ConfigFile;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Port to listen on (defaults to config or 8080)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory to serve
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Expose dotfiles (including .env) over HTTP and probe the API key
    #[arg(long, overrides_with = "no_expose_env")]
    pub expose_env: bool,

    /// Keep dotfiles hidden even when prevu.toml sets expose_env = true
    #[arg(long)]
    pub no_expose_env: bool,

    /// Do not open browser
    #[arg(long)]
    pub no_open: bool,
}

/// Run the preview command.
pub async fn run(args: PreviewArgs, config: ConfigFile) -> Result<()> {
    let port = args.port.unwrap_or(config.preview.port);
    let expose_env = resolve_expose_env(&args, &config);

    if expose_env {
        tracing::warn!(
            "Dotfiles (including .env secrets) are readable by anyone who can reach port {}",
            port
        );
    }

    let page = write_preview_page(&args.dir, expose_env)
        .with_context(|| format!("Failed to write {} in {}", PREVIEW_PAGE, args.dir.display()))?;

    tracing::info!("Wrote {}", page.display());

    let server = StaticServer::preview(
        ServerConfig {
            root: args.dir,
            host: args.host,
            port,
            open_path: (!args.no_open).then(|| format!("/{}", PREVIEW_PAGE)),
        },
        expose_env,
    );

    server.start().await?;

    Ok(())
}

/// Flags take precedence over prevu.toml, so --no-expose-env turns a
/// file-enabled probe back off for a single run.
fn resolve_expose_env(args: &PreviewArgs, config: &ConfigFile) -> bool {
    if args.no_expose_env {
        false
    } else {
        args.expose_env || config.preview.expose_env
    }
}
