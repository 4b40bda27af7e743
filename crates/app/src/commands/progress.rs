//! `drill progress` and `drill reset`.

use anyhow::Result;
use tracing::info;

use super::open_services;
use crate::terminal::{render_progress, render_welcome};

pub async fn run(db_url: &str) -> Result<()> {
    let services = open_services(db_url).await?;
    println!("{}", render_welcome(&services.welcome().await));
    println!("{}", render_progress(&services.progress().await));
    Ok(())
}

pub async fn reset(db_url: &str) -> Result<()> {
    let services = open_services(db_url).await?;
    services.reset().await;
    info!("progress reset");
    println!("Progress reset.");
    Ok(())
}
