pub mod practice;
pub mod progress;
pub mod serve;

use anyhow::{Context, Result};
use services::{AppServices, Clock};

use crate::db::{normalize_sqlite_url, prepare_sqlite_file};

/// Open (creating if needed) the progress database behind `db_url`.
pub async fn open_services(db_url: &str) -> Result<AppServices> {
    let url = normalize_sqlite_url(db_url);
    prepare_sqlite_file(&url)?;
    AppServices::new_sqlite(&url, Clock::system())
        .await
        .with_context(|| format!("opening {url}"))
}
