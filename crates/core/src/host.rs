// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capabilities the scheduler consumes from its host
//!
//! The core never touches the outside world directly. It resolves named
//! flags through a [`StateResolver`], forwards raw commands to a
//! [`CommandSink`], and arms re-checks through a [`DeferredScheduler`].

use std::sync::Arc;
use std::time::Duration;

/// Resolves dotted paths (`"sys.balance"`) to the current boolean value.
///
/// A path that does not resolve must yield `false`, never an error.
pub trait StateResolver: Send + Sync {
    fn get_bool(&self, path: &str) -> bool;
}

/// Fire-and-forget sink for raw command strings
pub trait CommandSink: Send + Sync {
    fn send(&self, command: &str);
}

/// One-shot callback armed on a [`DeferredScheduler`]
pub type Deferred = Box<dyn FnOnce() + Send + 'static>;

/// Invokes a callback exactly once after at least `delay` has elapsed,
/// on the same logical control thread as the queues it drives.
pub trait DeferredScheduler: Send + Sync {
    fn defer(&self, delay: Duration, callback: Deferred);
}

/// Command sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCommandSink;

impl CommandSink for NoOpCommandSink {
    fn send(&self, _command: &str) {}
}

/// Scheduler that drops every callback, for validation-only registries
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpScheduler;

impl DeferredScheduler for NoOpScheduler {
    fn defer(&self, _delay: Duration, _callback: Deferred) {}
}

/// Adapter dependencies shared by every queue of a registry
#[derive(Clone)]
pub struct HostDeps {
    pub state: Arc<dyn StateResolver>,
    pub sink: Arc<dyn CommandSink>,
    pub scheduler: Arc<dyn DeferredScheduler>,
}

impl HostDeps {
    pub fn new(
        state: impl StateResolver + 'static,
        sink: impl CommandSink + 'static,
        scheduler: impl DeferredScheduler + 'static,
    ) -> Self {
        Self {
            state: Arc::new(state),
            sink: Arc::new(sink),
            scheduler: Arc::new(scheduler),
        }
    }
}

impl std::fmt::Debug for HostDeps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostDeps").finish_non_exhaustive()
    }
}
