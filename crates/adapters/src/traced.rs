// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use gateq_core::{CommandSink, Deferred, DeferredScheduler};
use std::time::Duration;

/// Wrapper that adds tracing to any CommandSink
#[derive(Clone)]
pub struct TracedCommandSink<S> {
    inner: S,
}

impl<S> TracedCommandSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: CommandSink> CommandSink for TracedCommandSink<S> {
    fn send(&self, command: &str) {
        let span = tracing::info_span!("command.send");
        let _guard = span.enter();

        tracing::info!(command, "sending");
        let start = std::time::Instant::now();
        self.inner.send(command);
        tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "sent");
    }
}

/// Wrapper that adds tracing to any DeferredScheduler
#[derive(Clone)]
pub struct TracedScheduler<S> {
    inner: S,
}

impl<S> TracedScheduler<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: DeferredScheduler> DeferredScheduler for TracedScheduler<S> {
    fn defer(&self, delay: Duration, callback: Deferred) {
        let delay_ms = delay.as_millis() as u64;
        tracing::debug!(delay_ms, "deferring check");
        self.inner.defer(
            delay,
            Box::new(move || {
                let span = tracing::info_span!("deferred.fire", delay_ms);
                let _guard = span.enter();
                callback();
            }),
        );
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
