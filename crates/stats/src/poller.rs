//! Background poller for aggregate fiscal-note statistics.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Notify;

use notapro_client::{ApiError, NoteStats};

/// Refresh cadence of the statistics snapshot.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Seam for the upstream statistics fetch.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_note_stats(&self) -> Result<NoteStats, ApiError>;
}

/// Last-known statistics plus refresh metadata.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Last successfully fetched values; survives later failures.
    pub stats: Option<NoteStats>,
    /// Inline error indicator for the most recent refresh, if it failed.
    pub error: Option<String>,
    /// When `stats` was last replaced.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Shared view of the poller: read the snapshot, request shutdown.
#[derive(Debug, Clone)]
pub struct StatsHandle {
    snapshot: Arc<RwLock<StatsSnapshot>>,
    shutdown: Arc<Notify>,
}

impl StatsHandle {
    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot.read().expect("stats snapshot poisoned").clone()
    }

    /// Request graceful shutdown of the polling task.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

/// Background poller that refreshes the snapshot on a fixed interval.
pub struct StatsPoller {
    source: Arc<dyn StatsSource>,
    snapshot: Arc<RwLock<StatsSnapshot>>,
    shutdown: Arc<Notify>,
    interval: Duration,
}

impl StatsPoller {
    pub fn new(source: Arc<dyn StatsSource>) -> Self {
        Self::with_interval(source, POLL_INTERVAL)
    }

    pub fn with_interval(source: Arc<dyn StatsSource>, interval: Duration) -> Self {
        Self {
            source,
            snapshot: Arc::new(RwLock::new(StatsSnapshot::default())),
            shutdown: Arc::new(Notify::new()),
            interval,
        }
    }

    pub fn handle(&self) -> StatsHandle {
        StatsHandle {
            snapshot: self.snapshot.clone(),
            shutdown: self.shutdown.clone(),
        }
    }

    /// Fetch once and fold the outcome into the snapshot.
    ///
    /// Success replaces the values and clears the error flag; failure sets
    /// the flag and leaves the previous values untouched.
    pub async fn refresh(&self) {
        match self.source.fetch_note_stats().await {
            Ok(stats) => {
                let mut snapshot = self.snapshot.write().expect("stats snapshot poisoned");
                snapshot.stats = Some(stats);
                snapshot.error = None;
                snapshot.last_updated = Some(Utc::now());
            }
            Err(e) => {
                tracing::warn!(error = %e, "statistics refresh failed; keeping last values");
                let mut snapshot = self.snapshot.write().expect("stats snapshot poisoned");
                snapshot.error = Some(e.user_message().to_string());
            }
        }
    }

    /// Start the background task: an immediate first fetch, then one per
    /// interval until shutdown is requested.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            tracing::info!(interval = ?self.interval, "statistics poller started");

            let mut tick = tokio::time::interval(self.interval);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = shutdown.notified() => {
                        tracing::info!("statistics poller received shutdown signal");
                        break;
                    }
                    _ = tick.tick() => {
                        self.refresh().await;
                    }
                }
            }

            tracing::info!("statistics poller stopped");
        })
    }
}
