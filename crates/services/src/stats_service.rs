use std::sync::Arc;

use drill_core::model::{SessionHistoryEntry, UserStats};
use serde::Serialize;
use serde::de::DeserializeOwned;
use storage::repository::{KeyValueStore, StorageError};
use tracing::{debug, warn};

/// Key of the lifetime stats blob, shared with the browser build.
pub const USER_STATS_KEY: &str = "mathTrainer.userStats";
/// Key of the completed-session log.
pub const SESSION_HISTORY_KEY: &str = "mathTrainer.sessionHistory";

/// Loads and saves lifetime stats and session history.
///
/// Persistence is best effort: read failures and malformed blobs fall back to
/// defaults, write failures are logged and skipped. No method returns an error.
#[derive(Clone)]
pub struct StatsService {
    kv: Arc<dyn KeyValueStore>,
}

impl StatsService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Stats saved by a previous run, or zeroed defaults.
    pub async fn load_stats(&self) -> UserStats {
        self.read_json::<UserStats>(USER_STATS_KEY)
            .await
            .map(UserStats::normalized)
            .unwrap_or_default()
    }

    pub async fn save_stats(&self, stats: &UserStats) {
        self.write_json(USER_STATS_KEY, stats).await;
    }

    /// Completed sessions, oldest first.
    pub async fn load_history(&self) -> Vec<SessionHistoryEntry> {
        self.read_json(SESSION_HISTORY_KEY).await.unwrap_or_default()
    }

    /// Append one entry to the history log and return the new length.
    pub async fn append_history(&self, entry: SessionHistoryEntry) -> usize {
        let mut history = self.load_history().await;
        history.push(entry);
        self.write_json(SESSION_HISTORY_KEY, &history).await;
        history.len()
    }

    /// Drop saved stats and history so the next load starts from defaults.
    pub async fn reset(&self) {
        for key in [USER_STATS_KEY, SESSION_HISTORY_KEY] {
            match self.kv.remove(key).await {
                Ok(()) | Err(StorageError::NotFound) => debug!(key, "blob cleared"),
                Err(err) => warn!(key, error = %err, "failed to clear blob"),
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let blob = match self.kv.get(key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!(key, "no saved blob, using defaults");
                return None;
            }
            Err(err) => {
                warn!(key, error = %err, "failed to read saved blob, using defaults");
                return None;
            }
        };

        match serde_json::from_str(&blob) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "saved blob is malformed, using defaults");
                None
            }
        }
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let blob = match serde_json::to_string(value) {
            Ok(blob) => blob,
            Err(err) => {
                let err = StorageError::Serialization(err.to_string());
                warn!(key, error = %err, "failed to encode blob, save skipped");
                return;
            }
        };
        if let Err(err) = self.kv.set(key, &blob).await {
            warn!(key, error = %err, "failed to save blob, save skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use drill_core::model::{AchievementId, Difficulty, Operation};
    use storage::repository::{InMemoryStore, UnavailableStore};

    fn entry(accuracy: u32) -> SessionHistoryEntry {
        SessionHistoryEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            accuracy,
            problems_correct: 4,
            total_problems: 5,
            average_time: 3.2,
            best_streak: 3,
            operations: vec![Operation::Addition],
            difficulty: Difficulty::Beginner,
        }
    }

    #[tokio::test]
    async fn missing_blob_loads_defaults() {
        let service = StatsService::new(Arc::new(InMemoryStore::new()));
        assert_eq!(service.load_stats().await, UserStats::default());
        assert!(service.load_history().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_blob_loads_defaults() {
        let store = InMemoryStore::with_entries([
            (USER_STATS_KEY, "{not json"),
            (SESSION_HISTORY_KEY, "42"),
        ]);
        let service = StatsService::new(Arc::new(store));
        assert_eq!(service.load_stats().await, UserStats::default());
        assert!(service.load_history().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_achievement_id_counts_as_malformed() {
        let store = InMemoryStore::with_entries([(
            USER_STATS_KEY,
            r#"{"totalProblems":3,"achievementsUnlocked":["mystery"]}"#,
        )]);
        let service = StatsService::new(Arc::new(store));
        assert_eq!(service.load_stats().await, UserStats::default());
    }

    #[tokio::test]
    async fn stats_roundtrip_through_store() {
        let store = InMemoryStore::new();
        let service = StatsService::new(Arc::new(store.clone()));
        let stats = UserStats::from_counts(10, 8, 2, 5, vec![AchievementId::Accuracy80]);
        service.save_stats(&stats).await;

        let raw = store.get(USER_STATS_KEY).await.unwrap().unwrap();
        assert!(raw.contains("\"totalProblems\":10"));
        assert!(raw.contains("\"accuracy_80\""));
        assert_eq!(service.load_stats().await, stats);
    }

    #[tokio::test]
    async fn history_appends_in_order() {
        let service = StatsService::new(Arc::new(InMemoryStore::new()));
        assert_eq!(service.append_history(entry(80)).await, 1);
        assert_eq!(service.append_history(entry(90)).await, 2);
        let history = service.load_history().await;
        assert_eq!(
            history.iter().map(|e| e.accuracy).collect::<Vec<_>>(),
            vec![80, 90]
        );
    }

    #[tokio::test]
    async fn unavailable_store_never_fails() {
        let service = StatsService::new(Arc::new(UnavailableStore));
        service.save_stats(&UserStats::from_counts(1, 1, 1, 1, Vec::new())).await;
        assert_eq!(service.load_stats().await, UserStats::default());
        assert_eq!(service.append_history(entry(50)).await, 1);
        service.reset().await;
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let service = StatsService::new(Arc::new(InMemoryStore::new()));
        service
            .save_stats(&UserStats::from_counts(7, 7, 7, 7, Vec::new()))
            .await;
        service.append_history(entry(100)).await;
        service.reset().await;
        assert_eq!(service.load_stats().await, UserStats::default());
        assert!(service.load_history().await.is_empty());
    }

    #[tokio::test]
    async fn reset_removes_blobs_from_store() {
        let store = Arc::new(InMemoryStore::with_entries([(USER_STATS_KEY, "{}")]));
        let service = StatsService::new(store.clone());
        service.reset().await;
        assert_eq!(store.get(USER_STATS_KEY).await.unwrap(), None);
        assert_eq!(store.get(SESSION_HISTORY_KEY).await.unwrap(), None);

        StatsService::new(Arc::new(UnavailableStore)).reset().await;
    }
}
