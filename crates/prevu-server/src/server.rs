//! Server core shared by both launchers.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use tower_http::services::ServeDir;

use crate::preview::preview_router;

/// Configuration for a preview server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory to serve files from
    pub root: PathBuf,

    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Path to open in the default browser once bound; `None` disables
    /// the browser side effect entirely.
    pub open_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            host: "127.0.0.1".to_string(),
            port: 8080,
            open_path: Some("/".to_string()),
        }
    }
}

/// Errors that can occur while starting or running a server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Port {0} is already in use; stop the other server or pass a different --port")]
    PortInUse(u16),

    #[error("Failed to bind to {0}: {1}")]
    Bind(String, #[source] std::io::Error),

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// A static file server bound to a single directory.
pub struct StaticServer {
    config: ServerConfig,
    router: Router,
}

impl StaticServer {
    /// Serve the root directory verbatim: no rewrites, no extra headers.
    pub fn plain(config: ServerConfig) -> Self {
        let router = Router::new().fallback_service(ServeDir::new(&config.root));
        Self { config, router }
    }

    /// Serve the root directory through the preview pipeline: CORS headers
    /// on every response and a routing fallback for extensionless paths.
    /// Dotfiles are only reachable when `expose_env` is set.
    pub fn preview(config: ServerConfig, expose_env: bool) -> Self {
        let router = preview_router(&config.root, expose_env);
        Self { config, router }
    }

    /// Bind the listener and serve until interrupted.
    pub async fn start(self) -> Result<(), ServerError> {
        // Bind through ToSocketAddrs so hostnames like "localhost" resolve
        // instead of being rejected as malformed literals.
        let requested = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AddrInUse {
                    ServerError::PortInUse(self.config.port)
                } else {
                    ServerError::Bind(requested, e)
                }
            })?;

        let addr: SocketAddr = listener.local_addr().map_err(ServerError::Serve)?;

        tracing::info!(
            "Serving {} at http://{}",
            self.config.root.display(),
            addr
        );

        // Open the browser only after the bind succeeded, so we never point
        // it at a dead URL. Failure to open is non-fatal.
        if let Some(path) = &self.config.open_path {
            let url = format!("http://{}{}", addr, path);
            if let Err(e) = open_browser(&url) {
                tracing::warn!("Could not open a browser ({}); open {} manually", e, url);
            }
        }

        tracing::info!("Press Ctrl+C to stop");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Server stopped");

        Ok(())
    }
}

/// Best-effort browser launch; the caller decides how to report failure.
fn open_browser(url: &str) -> std::io::Result<()> {
    open::that(url)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Received interrupt, shutting down");
}
