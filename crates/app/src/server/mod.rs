//! HTTP server for the browser assets.

mod static_files;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use static_files::{AssetRoot, static_handler};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub assets_dir: PathBuf,
    pub bind: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Router serving every path from `assets_dir`.
pub fn create_router(assets_dir: PathBuf) -> Router {
    Router::new()
        .fallback(static_handler)
        .with_state(Arc::new(AssetRoot::new(assets_dir)))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until interrupted.
pub async fn run(config: ServerConfig) -> Result<()> {
    if !config.assets_dir.is_dir() {
        warn!(dir = %config.assets_dir.display(), "assets directory does not exist");
    }

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening at http://{addr}");

    axum::serve(listener, create_router(config.assets_dir))
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await
        .context("serving assets")?;
    Ok(())
}

/// Resolves once `signal` fires. A signal that cannot be installed is logged
/// and the server keeps running.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            warn!(error = %err, "failed to listen for ctrl-c, shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use std::fs;
    use std::time::Duration;

    fn assets() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>Drill</h1>").unwrap();
        fs::write(dir.path().join("app.js"), "console.log('drill');").unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs").join("index.html"), "docs").unwrap();
        dir
    }

    #[tokio::test]
    async fn serves_index_for_root() {
        let dir = assets();
        let server = TestServer::new(create_router(dir.path().to_path_buf())).unwrap();

        let response = server.get("/").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "<h1>Drill</h1>");
        assert!(
            response
                .header("content-type")
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
    }

    #[tokio::test]
    async fn serves_files_with_guessed_type() {
        let dir = assets();
        let server = TestServer::new(create_router(dir.path().to_path_buf())).unwrap();

        let response = server.get("/app.js").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "console.log('drill');");
        assert!(
            response
                .header("content-type")
                .to_str()
                .unwrap()
                .contains("javascript")
        );
    }

    #[tokio::test]
    async fn directories_fall_back_to_their_index() {
        let dir = assets();
        let server = TestServer::new(create_router(dir.path().to_path_buf())).unwrap();
        let response = server.get("/docs").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "docs");
    }

    #[tokio::test]
    async fn missing_files_are_not_found() {
        let dir = assets();
        let server = TestServer::new(create_router(dir.path().to_path_buf())).unwrap();
        let response = server.get("/nope.css").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn only_reads_are_allowed() {
        let dir = assets();
        let server = TestServer::new(create_router(dir.path().to_path_buf())).unwrap();
        let response = server.post("/app.js").await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn addr_combines_bind_and_port() {
        let config = ServerConfig {
            assets_dir: PathBuf::from("public"),
            bind: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
        };
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
    }

    #[tokio::test]
    async fn shutdown_waits_when_signal_cannot_be_installed() {
        let failed = async { Err(std::io::Error::other("no signal handler")) };
        let waited =
            tokio::time::timeout(Duration::from_millis(50), wait_for_shutdown(failed)).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn shutdown_resolves_on_signal() {
        let fired = async { Ok(()) };
        tokio::time::timeout(Duration::from_millis(50), wait_for_shutdown(fired))
            .await
            .unwrap();
    }
}
