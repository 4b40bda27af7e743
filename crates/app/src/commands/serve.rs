//! `drill serve`: static asset server.

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::server::{self, ServerConfig};

/// Default port for the asset server
pub const DEFAULT_PORT: u16 = 80;
/// Default bind address for the asset server
pub const DEFAULT_BIND: &str = "0.0.0.0";

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Directory with the browser assets
    #[arg(long, env = "DRILL_ASSETS_DIR", default_value = "public")]
    pub assets: PathBuf,

    /// Port to listen on
    #[arg(short, long, env = "DRILL_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: IpAddr,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    server::run(ServerConfig {
        assets_dir: args.assets,
        bind: args.bind,
        port: args.port,
    })
    .await
}
