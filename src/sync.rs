//! Sync orchestration.
//!
//! Ties one [`CatalogSource`] to one [`TemplateStore`] behind a
//! throttling state machine: a trigger while `READY` runs a full sync to
//! completion; triggers during `COOLING_DOWN` are dropped outright (a
//! debounce, not a queue — at most one sync per interval). Cooldown
//! expires after a fixed interval regardless of the previous outcome.
//!
//! Exactly one outcome notification is emitted per run, to every
//! registered [`SyncObserver`]: success with a "had new content" flag
//! and the accumulated warnings, or a single fatal error.

use crate::catalog::CatalogSource;
use crate::error::Result;
use crate::store::TemplateStore;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Default cooldown between syncs.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Supplies the current execution platform version at sync time.
///
/// The platform version is a runtime value (it changes when the user
/// retargets the modeler), so it is queried per run rather than captured
/// at construction.
pub trait PlatformVersionProvider {
    fn platform_version(&self) -> String;
}

/// A provider that always reports the same version.
#[derive(Debug, Clone)]
pub struct FixedPlatformVersion(pub String);

impl PlatformVersionProvider for FixedPlatformVersion {
    fn platform_version(&self) -> String {
        self.0.clone()
    }
}

/// Receives the single outcome notification of each sync run.
pub trait SyncObserver {
    /// The run completed; `has_new` is true when the persisted store
    /// changed.
    fn update_success(&self, has_new: bool, warnings: &[String]);

    /// The run failed fatally.
    fn update_error(&self, message: &str);
}

/// Outcome of a completed sync run.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// Whether the persisted store changed.
    pub has_new: bool,
    /// Recovered per-item failures, in deterministic order.
    pub warnings: Vec<String>,
    /// When the run completed.
    pub checked_at: DateTime<Utc>,
}

/// What happened to a trigger.
#[derive(Debug)]
pub enum SyncRun {
    /// A sync ran to completion.
    Completed(SyncOutcome),
    /// The trigger arrived during cooldown and was dropped.
    Dropped,
}

enum SyncState {
    Ready,
    CoolingDown(Instant),
}

/// Orchestrates syncs for one catalog namespace.
pub struct SyncOrchestrator {
    source: Box<dyn CatalogSource>,
    store: TemplateStore,
    versions: Box<dyn PlatformVersionProvider>,
    observers: Vec<Box<dyn SyncObserver>>,
    interval: Duration,
    state: SyncState,
}

impl SyncOrchestrator {
    /// Create an orchestrator with the default 24-hour cooldown.
    pub fn new(
        source: Box<dyn CatalogSource>,
        store: TemplateStore,
        versions: Box<dyn PlatformVersionProvider>,
    ) -> Self {
        Self {
            source,
            store,
            versions,
            observers: Vec::new(),
            interval: DEFAULT_SYNC_INTERVAL,
            state: SyncState::Ready,
        }
    }

    /// Override the cooldown interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Register an observer for outcome notifications.
    pub fn add_observer(&mut self, observer: Box<dyn SyncObserver>) {
        self.observers.push(observer);
    }

    /// Handle a sync trigger (e.g. an active-tab change).
    ///
    /// Runs a sync if the orchestrator is ready, drops the trigger if it
    /// is cooling down. A sync runs to completion before returning; it
    /// is not cancellable.
    pub fn trigger(&mut self) -> Result<SyncRun> {
        if let SyncState::CoolingDown(since) = &self.state {
            if since.elapsed() < self.interval {
                tracing::debug!("sync trigger dropped for {}: cooling down", self.source.name());
                return Ok(SyncRun::Dropped);
            }
        }

        // Cooldown starts at the trigger and expires on schedule whether
        // the run succeeds or fails.
        self.state = SyncState::CoolingDown(Instant::now());

        match self.run_sync() {
            Ok(outcome) => {
                for observer in &self.observers {
                    observer.update_success(outcome.has_new, &outcome.warnings);
                }
                Ok(SyncRun::Completed(outcome))
            }
            Err(e) => {
                let message = e.to_string();
                for observer in &self.observers {
                    observer.update_error(&message);
                }
                Err(e)
            }
        }
    }

    fn run_sync(&mut self) -> Result<SyncOutcome> {
        let current = self.store.load();
        let platform_version = self.versions.platform_version();

        tracing::debug!(
            "syncing {} against platform version {}",
            self.source.name(),
            platform_version
        );

        let updates = self.source.fetch_updates(&current, &platform_version)?;

        let has_new = updates.templates != current;
        self.store.save(&updates.templates)?;

        Ok(SyncOutcome {
            has_new,
            warnings: updates.warnings,
            checked_at: Utc::now(),
        })
    }
}
