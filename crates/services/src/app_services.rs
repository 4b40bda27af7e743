use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::progress_view::{ProgressView, WelcomeView};
use crate::sessions::PracticeLoopService;
use crate::sink::PracticeSink;
use crate::stats_service::StatsService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    stats: StatsService,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::with_storage(&storage, clock))
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::with_storage(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn with_storage(storage: &Storage, clock: Clock) -> Self {
        Self {
            clock,
            stats: StatsService::new(Arc::clone(&storage.kv)),
        }
    }

    #[must_use]
    pub fn stats(&self) -> &StatsService {
        &self.stats
    }

    /// Practice loop rendering to `sink`, with stats loaded from storage.
    pub async fn practice_loop(&self, sink: Arc<dyn PracticeSink>) -> PracticeLoopService {
        PracticeLoopService::load(self.clock, self.stats.clone(), sink).await
    }

    pub async fn welcome(&self) -> WelcomeView {
        WelcomeView::from_stats(&self.stats.load_stats().await)
    }

    pub async fn progress(&self) -> ProgressView {
        let stats = self.stats.load_stats().await;
        let history = self.stats.load_history().await;
        ProgressView::build(&stats, &history)
    }

    pub async fn reset(&self) {
        self.stats.reset().await;
    }
}
