// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deferred scheduler backed by tokio timers

use gateq_core::{Deferred, DeferredScheduler};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::{mpsc, Mutex};

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("no tokio runtime is running: {0}")]
    NoRuntime(#[from] TryCurrentError),
}

/// Decrements the pending count once a callback has run or been dropped,
/// including when the callback panics.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A callback whose timer has elapsed, waiting for the driver
struct Fired {
    callback: Deferred,
    _guard: PendingGuard,
}

/// Deferred scheduler backed by tokio timers.
///
/// Timers sleep on spawned tasks, but a fired callback is only handed to
/// [`TokioScheduler::run_until_idle`], which runs it on the calling task.
/// Every callback therefore runs on the same control task as the code that
/// drives the registry, one at a time.
#[derive(Clone)]
pub struct TokioScheduler {
    handle: Handle,
    pending: Arc<AtomicUsize>,
    fired_tx: mpsc::UnboundedSender<Fired>,
    fired_rx: Arc<Mutex<mpsc::UnboundedReceiver<Fired>>>,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        Self {
            handle,
            pending: Arc::new(AtomicUsize::new(0)),
            fired_tx,
            fired_rx: Arc::new(Mutex::new(fired_rx)),
        }
    }

    /// Bind to the runtime of the calling context
    pub fn current() -> Result<Self, TimerError> {
        Ok(Self::new(Handle::try_current()?))
    }

    /// Callbacks armed but not yet run
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Run fired callbacks on the calling task until none are pending.
    /// Callbacks that arm further callbacks keep the driver busy.
    ///
    /// Returns `false` if `limit` elapsed first.
    pub async fn run_until_idle(&self, limit: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        let mut fired_rx = self.fired_rx.lock().await;
        while self.pending() > 0 {
            match tokio::time::timeout_at(deadline, fired_rx.recv()).await {
                Ok(Some(fired)) => (fired.callback)(),
                Ok(None) | Err(_) => return false,
            }
        }
        true
    }
}

impl DeferredScheduler for TokioScheduler {
    fn defer(&self, delay: Duration, callback: Deferred) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        let fired = Fired {
            callback,
            _guard: PendingGuard(Arc::clone(&self.pending)),
        };
        let fired_tx = self.fired_tx.clone();
        tracing::trace!(delay_ms = delay.as_millis() as u64, "timer armed");
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if fired_tx.send(fired).is_err() {
                tracing::debug!("scheduler dropped before timer fired");
            }
        });
    }
}

impl std::fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
