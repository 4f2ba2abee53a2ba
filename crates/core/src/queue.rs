// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Condition-gated action queue
//!
//! A queue holds an ordered list of actions and a condition that gates the
//! whole queue. [`Queue::run`] executes actions until the list is empty, a
//! gate fails, `single_step` stops it, or a resource-consuming action has
//! run. A consuming action arms a deferred check: if its `consumed`
//! condition still holds after the retry delay, the action is put back at
//! the front of the queue and the queue runs again.
//!
//! The action list lock is never held while predicates, callables or the
//! command sink run, so action code may freely call back into this queue
//! or any other.

use crate::action::{Action, IntoAction};
use crate::condition::Condition;
use crate::error::QueueError;
use crate::host::HostDeps;
use crate::options::QueueOptions;
use crate::value::Value;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Delay before a consuming action's condition is re-checked
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Property names exposed read-only by [`Queue::set_property`]
pub const PROPERTIES: [&str; 4] = ["name", "conditions", "options", "actions"];

struct Entry {
    id: u64,
    action: Action,
    /// Times this action has been re-inserted by a failed consumption check
    attempts: u32,
}

#[derive(Default)]
struct ActionList {
    entries: VecDeque<Entry>,
    next_id: u64,
}

impl ActionList {
    fn entry(&mut self, action: Action, attempts: u32) -> Entry {
        let id = self.next_id;
        self.next_id += 1;
        Entry {
            id,
            action,
            attempts,
        }
    }

    fn push_back(&mut self, action: Action) {
        let entry = self.entry(action, 0);
        self.entries.push_back(entry);
    }

    fn push_front(&mut self, action: Action, attempts: u32) {
        let entry = self.entry(action, attempts);
        self.entries.push_front(entry);
    }

    /// Pick the next candidate: the head under `strict_order`, otherwise
    /// the first action without a `consumed` condition, falling back to the
    /// head.
    fn select(&self, options: QueueOptions) -> Option<(u64, Action, u32)> {
        let index = if options.strict_order {
            0
        } else {
            self.entries
                .iter()
                .position(|entry| entry.action.consumed.is_none())
                .unwrap_or(0)
        };
        self.entries
            .get(index)
            .map(|entry| (entry.id, entry.action.clone(), entry.attempts))
    }

    fn remove(&mut self, id: u64) -> bool {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => self.entries.remove(index).is_some(),
            None => false,
        }
    }
}

/// Outcome of a single scheduling step
enum Step {
    Continue,
    Stop,
}

struct QueueInner {
    name: String,
    conditions: Condition,
    options: QueueOptions,
    host: HostDeps,
    retry_delay: Duration,
    actions: Mutex<ActionList>,
    /// Bumped by reset and deletion; armed checks from an older
    /// generation are dropped when they fire.
    generation: AtomicU64,
}

/// Handle to a named queue. Clones share the same queue.
#[derive(Clone)]
pub struct Queue {
    inner: Arc<QueueInner>,
}

impl Queue {
    /// Validate and build a queue. Registration is the registry's job.
    pub(crate) fn new(
        name: &str,
        conditions: Value,
        options: Value,
        host: HostDeps,
        retry_delay: Duration,
    ) -> Result<Self, QueueError> {
        if name.trim().is_empty() {
            return Err(QueueError::invalid_argument("queue name is required"));
        }
        let conditions = queue_conditions(conditions)?;
        let options = QueueOptions::try_from(options)?;

        Ok(Self {
            inner: Arc::new(QueueInner {
                name: name.to_string(),
                conditions,
                options,
                host,
                retry_delay,
                actions: Mutex::new(ActionList::default()),
                generation: AtomicU64::new(0),
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Copy of the queue-level condition
    pub fn conditions(&self) -> Condition {
        self.inner.conditions.clone()
    }

    pub fn options(&self) -> QueueOptions {
        self.inner.options
    }

    pub fn retry_delay(&self) -> Duration {
        self.inner.retry_delay
    }

    /// Snapshot of the queued actions, front first
    pub fn actions(&self) -> Vec<Action> {
        self.list()
            .entries
            .iter()
            .map(|entry| entry.action.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.list().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().entries.is_empty()
    }

    /// Normalize and append an action
    pub fn add(&self, action: impl IntoAction) -> Result<(), QueueError> {
        let action = action.into_action()?;
        let len = {
            let mut list = self.list();
            list.push_back(action);
            list.entries.len()
        };
        tracing::debug!(queue = %self.inner.name, len, "action added");
        Ok(())
    }

    /// Drop every queued action and cancel armed consumption checks
    pub fn reset(&self) {
        let dropped = {
            let mut list = self.list();
            let dropped = list.entries.len();
            list.entries.clear();
            dropped
        };
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(queue = %self.inner.name, dropped, "queue reset");
    }

    /// Queue properties are never writable; changes go through
    /// [`Queue::add`] and [`Queue::reset`].
    pub fn set_property(&self, property: &str, _value: impl Into<Value>) -> Result<(), QueueError> {
        if PROPERTIES.contains(&property) {
            Err(QueueError::ReadOnly(format!(
                "{}.{}",
                self.inner.name, property
            )))
        } else {
            Err(QueueError::invalid_argument(format!(
                "queue has no property {property:?}"
            )))
        }
    }

    /// Execute available actions until the queue blocks or drains
    pub fn run(&self) {
        let span = tracing::debug_span!("queue.run", queue = %self.inner.name);
        let _guard = span.enter();

        while let Step::Continue = self.step() {}
    }

    fn step(&self) -> Step {
        let state = self.inner.host.state.as_ref();

        if self.is_empty() {
            tracing::trace!("nothing queued");
            return Step::Stop;
        }

        if !self.inner.conditions.evaluate(state) {
            tracing::debug!(conditions = %self.inner.conditions, "queue conditions not met");
            return Step::Stop;
        }

        let Some((id, action, attempts)) = self.list().select(self.inner.options) else {
            return Step::Stop;
        };

        if !action.gates_open(state) {
            tracing::debug!(action = %action, "action gated");
            return Step::Stop;
        }

        if !self.list().remove(id) {
            tracing::debug!(action = %action, "action left the queue while gating");
            return Step::Stop;
        }

        tracing::debug!(code = %action.code, "executing action");
        action.code.execute(self.inner.host.sink.as_ref());

        if action.consumed.is_some() {
            self.arm_consumption_check(action, attempts);
            return Step::Stop;
        }

        if self.inner.options.single_step {
            Step::Stop
        } else {
            Step::Continue
        }
    }

    fn arm_consumption_check(&self, action: Action, attempts: u32) {
        let queue = self.clone();
        let generation = self.inner.generation.load(Ordering::SeqCst);
        self.inner.host.scheduler.defer(
            self.inner.retry_delay,
            Box::new(move || queue.verify_consumed(generation, action, attempts)),
        );
    }

    /// Re-check a consuming action's condition. If every leaf still holds
    /// the action did not take effect: put it back at the front and run.
    fn verify_consumed(&self, generation: u64, action: Action, attempts: u32) {
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(queue = %self.inner.name, "queue reset since arming, check dropped");
            return;
        }
        let Some(consumed) = &action.consumed else {
            return;
        };

        let (truthy, total) = consumed.truthy_leaves(self.inner.host.state.as_ref());
        if total == 0 || truthy < total {
            tracing::debug!(queue = %self.inner.name, truthy, total, "resource consumed");
            return;
        }

        let attempt = attempts.saturating_add(1);
        tracing::warn!(
            queue = %self.inner.name,
            consumed = %consumed,
            attempt,
            "resource still available after action, retrying"
        );
        self.list().push_front(action, attempt);
        self.run();
    }

    pub(crate) fn retire(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn list(&self) -> MutexGuard<'_, ActionList> {
        self.inner.actions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("name", &self.inner.name)
            .field("conditions", &self.inner.conditions)
            .field("options", &self.inner.options)
            .field("len", &self.len())
            .finish()
    }
}

/// Validate queue-level conditions.
///
/// A boolean, path or predicate is accepted as the whole value. A list may
/// only hold paths and predicates.
fn queue_conditions(value: Value) -> Result<Condition, QueueError> {
    match value {
        Value::Nil => Err(QueueError::invalid_argument("queue conditions are required")),
        Value::Bool(value) => Ok(Condition::Literal(value)),
        Value::Str(path) if path.is_empty() => {
            Err(QueueError::invalid_argument("queue condition path is empty"))
        }
        Value::Str(path) => Ok(Condition::Path(path)),
        Value::Predicate(predicate) => Ok(Condition::Predicate(predicate)),
        Value::List(members) => members
            .into_iter()
            .map(|member| match member {
                Value::Str(path) if !path.is_empty() => Ok(Condition::Path(path)),
                Value::Predicate(predicate) => Ok(Condition::Predicate(predicate)),
                other => Err(QueueError::invalid_argument(format!(
                    "queue condition lists may only hold paths and predicates, found {}",
                    other.kind()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Condition::All),
        other => Err(QueueError::invalid_argument(format!(
            "queue conditions must be a boolean, path, predicate or list, found {}",
            other.kind()
        ))),
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
