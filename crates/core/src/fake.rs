// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake host adapters for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::host::{CommandSink, Deferred, DeferredScheduler};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Fake clock with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration;
    }

    /// Set the clock to a specific instant
    pub fn set(&self, instant: Instant) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = instant;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Command sink that records every command it receives
#[derive(Clone, Default)]
pub struct FakeCommandSink {
    commands: Arc<Mutex<Vec<String>>>,
}

impl FakeCommandSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands, oldest first
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.commands
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl CommandSink for FakeCommandSink {
    fn send(&self, command: &str) {
        self.commands
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(command.to_string());
    }
}

struct PendingCallback {
    seq: u64,
    fire_at: Instant,
    callback: Deferred,
}

impl PartialEq for PendingCallback {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl Eq for PendingCallback {}

impl PartialOrd for PendingCallback {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingCallback {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-heap: earliest first, then in arming order
        Reverse((self.fire_at, self.seq)).cmp(&Reverse((other.fire_at, other.seq)))
    }
}

#[derive(Default)]
struct Timers {
    heap: BinaryHeap<PendingCallback>,
    next_seq: u64,
}

/// Deterministic deferred scheduler driven by a [`FakeClock`].
///
/// Callbacks fire only when the test advances time, and always run with no
/// internal lock held, so they may arm further callbacks.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: FakeClock,
    timers: Arc<Mutex<Timers>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> &FakeClock {
        &self.clock
    }

    /// Number of callbacks armed but not yet fired
    pub fn pending(&self) -> usize {
        self.timers.lock().unwrap_or_else(|e| e.into_inner()).heap.len()
    }

    pub fn next_fire_time(&self) -> Option<Instant> {
        self.timers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .heap
            .peek()
            .map(|pending| pending.fire_at)
    }

    /// Advance the clock and fire everything that is due. Returns the
    /// number of callbacks fired.
    pub fn advance(&self, duration: Duration) -> usize {
        self.clock.advance(duration);
        self.fire_due()
    }

    /// Jump from one fire time to the next until nothing is armed or
    /// `max_fires` callbacks have run.
    pub fn run_until_idle(&self, max_fires: usize) -> usize {
        let mut fired = 0;
        while fired < max_fires {
            let Some(fire_at) = self.next_fire_time() else {
                break;
            };
            if fire_at > self.clock.now() {
                self.clock.set(fire_at);
            }
            fired += self.fire_due();
        }
        fired
    }

    fn fire_due(&self) -> usize {
        let mut fired = 0;
        loop {
            let now = self.clock.now();
            let next = {
                let mut timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
                match timers.heap.peek() {
                    Some(pending) if pending.fire_at <= now => timers.heap.pop(),
                    _ => None,
                }
            };
            let Some(pending) = next else {
                break;
            };
            (pending.callback)();
            fired += 1;
        }
        fired
    }
}

impl DeferredScheduler for ManualScheduler {
    fn defer(&self, delay: Duration, callback: Deferred) {
        let fire_at = self.clock.now() + delay;
        let mut timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
        let seq = timers.next_seq;
        timers.next_seq += 1;
        timers.heap.push(PendingCallback {
            seq,
            fire_at,
            callback,
        });
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
