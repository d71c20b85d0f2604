//! Scoped auto-advance timer.
//!
//! An [`AutoAdvance`] spawns ticker tasks that send [`Tick`]s on a fixed
//! period. Each started ticker is owned by an [`AutoAdvanceGuard`]; dropping
//! the guard cancels the task. Every tick carries the generation of the
//! ticker that produced it so the receiver can discard ticks that were
//! already queued when a ticker was cancelled.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Default period between automatic advances.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(4000);

/// One timer firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Generation of the ticker that fired.
    pub generation: u64,
}

/// Starts ticker tasks that feed a single channel.
#[derive(Debug)]
pub struct AutoAdvance {
    interval: Duration,
    generation: u64,
    tx: mpsc::Sender<Tick>,
    parent: CancellationToken,
}

impl AutoAdvance {
    /// Create a ticker factory.
    ///
    /// Every ticker started from it stops when `parent` is cancelled.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use]
    pub fn new(interval: Duration, tx: mpsc::Sender<Tick>, parent: CancellationToken) -> Self {
        assert!(!interval.is_zero(), "auto-advance interval must be non-zero");
        Self {
            interval,
            generation: 0,
            tx,
            parent,
        }
    }

    /// Spawn a new ticker. The first tick fires one full period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> AutoAdvanceGuard {
        self.generation += 1;
        let generation = self.generation;
        let token = self.parent.child_token();
        let period = self.interval;
        let tx = self.tx.clone();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            trace!(generation, "auto-advance started");

            loop {
                tokio::select! {
                    biased;
                    () = task_token.cancelled() => break,
                    _ = ticks.tick() => {
                        tokio::select! {
                            biased;
                            () = task_token.cancelled() => break,
                            sent = tx.send(Tick { generation }) => {
                                if sent.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                }
            }

            trace!(generation, "auto-advance stopped");
        });

        AutoAdvanceGuard {
            generation,
            token,
            handle: Some(handle),
        }
    }
}

/// Ownership of one running ticker. Dropping it cancels the ticker.
#[derive(Debug)]
pub struct AutoAdvanceGuard {
    generation: u64,
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl AutoAdvanceGuard {
    /// Generation stamped on this ticker's ticks.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `tick` came from this ticker.
    #[must_use]
    pub fn owns(&self, tick: Tick) -> bool {
        tick.generation == self.generation
    }

    /// Whether the ticker is still scheduled to fire.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled() && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the ticker and wait for its task to exit.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for AutoAdvanceGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
