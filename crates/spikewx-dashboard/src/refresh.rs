//! Periodic refresh loop
//!
//! One task owns the view state. It fetches once at startup, then on every
//! interval tick or manual request. At most one fetch is in flight: a
//! trigger that arrives while one is pending is skipped, not queued.
//! Shutting down drops any pending fetch, so a late result is never
//! applied.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use spikewx_core::{FetchError, FetchResult, SnapshotSource, WeatherSnapshot};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::state::ViewState;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

type PendingFetch = Pin<Box<dyn Future<Output = FetchResult<WeatherSnapshot>> + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSettings {
    /// Time between scheduled fetches
    pub interval: Duration,
    /// Upper bound on a single fetch
    pub fetch_timeout: Duration,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Result of asking for a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Started,
    /// A fetch was already in flight
    Skipped,
}

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("refresh loop has stopped")]
    Stopped,
}

/// Counters reported when the loop stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub started: u64,
    pub skipped: u64,
    pub live: u64,
    pub degraded: u64,
}

enum Command {
    Refresh(oneshot::Sender<RefreshTrigger>),
}

struct RefreshLoop {
    source: Arc<dyn SnapshotSource>,
    settings: RefreshSettings,
    state: watch::Sender<ViewState>,
    commands: mpsc::Receiver<Command>,
    shutdown: oneshot::Receiver<()>,
    stats: RefreshStats,
}

/// Start the refresh loop on the current tokio runtime
pub fn spawn(source: Arc<dyn SnapshotSource>, settings: RefreshSettings) -> RefreshHandle {
    let (state_tx, state_rx) = watch::channel(ViewState::Loading);
    let (command_tx, command_rx) = mpsc::channel(8);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let refresh_loop = RefreshLoop {
        source,
        settings,
        state: state_tx,
        commands: command_rx,
        shutdown: shutdown_rx,
        stats: RefreshStats::default(),
    };
    let task = tokio::spawn(refresh_loop.run());

    RefreshHandle {
        commands: command_tx,
        state: state_rx,
        shutdown: Some(shutdown_tx),
        task: Some(task),
    }
}

async fn wait_pending(slot: &mut Option<PendingFetch>) -> FetchResult<WeatherSnapshot> {
    match slot {
        Some(fetch) => fetch.await,
        None => std::future::pending().await,
    }
}

impl RefreshLoop {
    async fn run(mut self) -> RefreshStats {
        let mut ticker = tokio::time::interval(self.settings.interval.max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut in_flight: Option<PendingFetch> = None;

        info!(
            source = self.source.name(),
            interval_secs = self.settings.interval.as_secs(),
            "Refresh loop started"
        );

        loop {
            tokio::select! {
                biased;
                _ = &mut self.shutdown => break,
                outcome = wait_pending(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    self.apply(outcome);
                }
                cmd = self.commands.recv() => match cmd {
                    Some(Command::Refresh(reply)) => {
                        let trigger = self.trigger(&mut in_flight, "manual");
                        let _ = reply.send(trigger);
                    }
                    // Handle dropped
                    None => break,
                },
                _ = ticker.tick() => {
                    self.trigger(&mut in_flight, "interval");
                }
            }
        }

        if in_flight.is_some() {
            debug!("Discarding in-flight fetch on shutdown");
        }
        info!(stats = ?self.stats, "Refresh loop stopped");
        self.stats
    }

    fn trigger(&mut self, in_flight: &mut Option<PendingFetch>, cause: &'static str) -> RefreshTrigger {
        if in_flight.is_some() {
            self.stats.skipped += 1;
            debug!(cause, "Fetch already in flight, skipping");
            return RefreshTrigger::Skipped;
        }

        self.stats.started += 1;
        debug!(cause, "Starting fetch");

        let source = Arc::clone(&self.source);
        let limit = self.settings.fetch_timeout;
        *in_flight = Some(Box::pin(async move {
            match tokio::time::timeout(limit, source.fetch_snapshot()).await {
                Ok(outcome) => outcome,
                Err(_) => Err(FetchError::Network(format!(
                    "no response within {}ms",
                    limit.as_millis()
                ))),
            }
        }));

        let next = self.state.borrow().begin_refresh();
        self.state.send_replace(next);
        RefreshTrigger::Started
    }

    fn apply(&mut self, outcome: FetchResult<WeatherSnapshot>) {
        match &outcome {
            Ok(snapshot) => {
                self.stats.live += 1;
                info!(
                    location = %snapshot.location,
                    temperature = snapshot.temperature.value,
                    wind_speed = snapshot.wind_speed.value,
                    "Weather snapshot refreshed"
                );
            }
            Err(e) => {
                self.stats.degraded += 1;
                warn!(kind = e.kind(), error = %e, "Weather fetch failed, showing fallback snapshot");
            }
        }
        self.state.send_replace(ViewState::resolve(outcome));
    }
}

/// Owner side of a running refresh loop. Dropping it tears the loop down.
pub struct RefreshHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<ViewState>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<RefreshStats>>,
}

impl RefreshHandle {
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    pub fn current(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Request a fetch now; skipped if one is already in flight
    pub async fn refresh(&self) -> Result<RefreshTrigger, RefreshError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(Command::Refresh(reply_tx))
            .await
            .map_err(|_| RefreshError::Stopped)?;
        reply_rx.await.map_err(|_| RefreshError::Stopped)
    }

    /// Stop the loop, cancel the timer and wait for the task to finish
    pub async fn shutdown(mut self) -> RefreshStats {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        match self.task.take() {
            Some(task) => match task.await {
                Ok(stats) => stats,
                Err(e) => {
                    warn!(error = ?e, "Refresh task ended abnormally");
                    RefreshStats::default()
                }
            },
            None => RefreshStats::default(),
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
