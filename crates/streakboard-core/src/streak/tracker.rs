//! Live streak tracker.
//!
//! A [`StreakTracker`] republishes the elapsed time since its reference
//! instant once per tick period on a `tokio::sync::watch` channel. It owns at
//! most one timer task. Every operation that invalidates the timer bumps a
//! generation counter under the same lock the task publishes through, so once
//! `deactivate`/`set_reference` returns, the old task can no longer publish.
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = StreakTracker::new(Arc::new(SystemClock));
//! tracker.set_reference(Some(user.last_relapse_datetime));
//! tracker.activate()?;
//! let mut rx = tracker.subscribe();
//! while rx.changed().await.is_ok() {
//!     render(&StreakDisplay::from_reading(&rx.borrow()));
//! }
//! ```

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::breakdown::{evaluate, Reading, ReadingStatus, ReferenceInstant};
use crate::clock::TimeSource;
use crate::error::TrackerError;

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(1000);

struct Shared {
    clock: Arc<dyn TimeSource>,
    tx: watch::Sender<Reading>,
    generation: Mutex<u64>,
}

impl Shared {
    fn generation(&self) -> MutexGuard<'_, u64> {
        self.generation.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Compute and publish, unless `generation` has been superseded.
    fn publish(&self, generation: u64, reference: &ReferenceInstant) -> Option<Reading> {
        let current = self.generation();
        if *current != generation {
            return None;
        }
        let reading = evaluate(reference, self.clock.now());
        self.tx.send_replace(reading);
        Some(reading)
    }

    /// Invalidate the running timer and return the new generation.
    fn bump(&self) -> u64 {
        let mut current = self.generation();
        *current = current.wrapping_add(1);
        *current
    }
}

pub struct StreakTracker {
    shared: Arc<Shared>,
    period: Duration,
    reference: Option<ReferenceInstant>,
    runtime: Option<Handle>,
    task: Option<JoinHandle<()>>,
}

impl StreakTracker {
    /// Inactive tracker with the default one-second period.
    pub fn new(clock: Arc<dyn TimeSource>) -> Self {
        let (tx, _rx) = watch::channel(Reading::PENDING);
        Self {
            shared: Arc::new(Shared {
                clock,
                tx,
                generation: Mutex::new(0),
            }),
            period: DEFAULT_TICK_PERIOD,
            reference: None,
            runtime: None,
            task: None,
        }
    }

    /// # Errors
    ///
    /// Returns [`TrackerError::ZeroPeriod`] for a zero period.
    pub fn with_period(clock: Arc<dyn TimeSource>, period: Duration) -> Result<Self, TrackerError> {
        if period.is_zero() {
            return Err(TrackerError::ZeroPeriod);
        }
        let mut tracker = Self::new(clock);
        tracker.period = period;
        Ok(tracker)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.runtime.is_some()
    }

    /// Whether a timer task is currently scheduled.
    pub fn is_ticking(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn reference(&self) -> Option<&ReferenceInstant> {
        self.reference.as_ref()
    }

    pub fn reading(&self) -> Reading {
        *self.shared.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Reading> {
        self.shared.tx.subscribe()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start publishing. With a reference in effect this computes once
    /// immediately and then on every tick.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NoRuntime`] when called outside a Tokio runtime.
    pub fn activate(&mut self) -> Result<(), TrackerError> {
        if self.is_active() {
            return Ok(());
        }
        let runtime = Handle::try_current().map_err(|_| TrackerError::NoRuntime)?;
        self.runtime = Some(runtime);
        tracing::debug!(period_ms = self.period.as_millis() as u64, "streak tracker activated");
        self.restart();
        Ok(())
    }

    /// Stop publishing. The last reading stays visible.
    pub fn deactivate(&mut self) {
        if self.runtime.take().is_none() {
            return;
        }
        self.stop();
        tracing::debug!("streak tracker deactivated");
    }

    /// Replace the reference instant. An unchanged value is ignored.
    ///
    /// A new reference takes effect immediately rather than at the next tick
    /// boundary. Clearing it stops the timer and resets the reading to pending.
    pub fn set_reference(&mut self, reference: Option<ReferenceInstant>) {
        if self.reference == reference {
            return;
        }
        self.reference = reference;
        if self.reference.is_none() {
            self.stop();
            self.shared.tx.send_replace(Reading::PENDING);
            return;
        }
        if self.is_active() {
            self.restart();
        }
    }

    /// Recompute now, outside the regular cadence (e.g. when the host
    /// regains focus). Ignored while inactive or without a reference.
    pub fn refresh(&self) -> Option<Reading> {
        if !self.is_ticking() {
            return None;
        }
        let reference = self.reference.as_ref()?;
        let generation = *self.shared.generation();
        let reading = self.shared.publish(generation, reference)?;
        log_reading(reference, &reading);
        Some(reading)
    }

    fn stop(&mut self) {
        self.shared.bump();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn restart(&mut self) {
        self.stop();
        let (Some(runtime), Some(reference)) = (self.runtime.as_ref(), self.reference.clone())
        else {
            return;
        };

        let generation = *self.shared.generation();
        if let Some(reading) = self.shared.publish(generation, &reference) {
            log_reading(&reference, &reading);
        }

        let shared = Arc::clone(&self.shared);
        let period = self.period;
        self.task = Some(runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let Some(reading) = shared.publish(generation, &reference) else {
                    break;
                };
                log_reading(&reference, &reading);
            }
        }));
    }
}

impl Drop for StreakTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Record a diagnostic for one computed reading.
///
/// An unparseable reference warns on every computation; future references
/// and normal ticks stay at debug/trace.
pub fn log_reading(reference: &ReferenceInstant, reading: &Reading) {
    match reading.status {
        ReadingStatus::InvalidReference => {
            tracing::warn!(%reference, "Invalid date, showing zero streak");
        }
        ReadingStatus::Future => {
            tracing::debug!(%reference, "reference instant is in the future, clamped to zero");
        }
        ReadingStatus::Counting | ReadingStatus::Pending => {
            tracing::trace!(%reference, elapsed = %reading.breakdown, "streak tick");
        }
    }
}
