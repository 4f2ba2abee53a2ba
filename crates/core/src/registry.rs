// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide table of named queues

use crate::error::QueueError;
use crate::host::HostDeps;
use crate::queue::{Queue, DEFAULT_RETRY_DELAY};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

/// Tunables shared by every queue of a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Delay before a consuming action's condition is re-checked
    #[serde(with = "humantime_serde")]
    pub retry_delay: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

struct RegistryInner {
    queues: Mutex<HashMap<String, Queue>>,
    host: HostDeps,
    config: RegistryConfig,
}

/// Owns the name to queue mapping. Clones share the same table.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

impl Registry {
    pub fn new(host: HostDeps, config: RegistryConfig) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                queues: Mutex::new(HashMap::new()),
                host,
                config,
            }),
        }
    }

    pub fn config(&self) -> RegistryConfig {
        self.inner.config
    }

    /// Validate and register a new queue
    pub fn create(
        &self,
        name: &str,
        conditions: impl Into<Value>,
        options: impl Into<Value>,
    ) -> Result<Queue, QueueError> {
        let queue = Queue::new(
            name,
            conditions.into(),
            options.into(),
            self.inner.host.clone(),
            self.inner.config.retry_delay,
        )?;

        let mut queues = self.table();
        if queues.contains_key(name) {
            return Err(QueueError::DuplicateName(name.to_string()));
        }
        queues.insert(name.to_string(), queue.clone());
        drop(queues);

        tracing::info!(
            queue = name,
            conditions = %queue.conditions(),
            options = %queue.options(),
            "queue created"
        );
        Ok(queue)
    }

    pub fn get(&self, name: &str) -> Result<Queue, QueueError> {
        self.table()
            .get(name)
            .cloned()
            .ok_or_else(|| QueueError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table().contains_key(name)
    }

    /// Run the named queue, or every queue when `name` is `None`
    pub fn run(&self, name: Option<&str>) -> Result<(), QueueError> {
        match name {
            Some(name) => {
                self.get(name)?.run();
                Ok(())
            }
            None => {
                self.run_all();
                Ok(())
            }
        }
    }

    /// Run every registered queue.
    ///
    /// Works from a snapshot taken up front: queues created while this runs
    /// are not visited, and queues deleted meanwhile still get their turn.
    pub fn run_all(&self) {
        let snapshot: Vec<Queue> = self.queues().into_values().collect();
        tracing::debug!(count = snapshot.len(), "running all queues");
        for queue in snapshot {
            queue.run();
        }
    }

    /// Unregister a queue and cancel its armed consumption checks.
    ///
    /// Handles already held elsewhere stay usable but are no longer
    /// reachable by name.
    pub fn delete(&self, name: &str) -> Result<Queue, QueueError> {
        let queue = self
            .table()
            .remove(name)
            .ok_or_else(|| QueueError::NotFound(name.to_string()))?;
        queue.retire();
        tracing::info!(queue = name, remaining = queue.len(), "queue deleted");
        Ok(queue)
    }

    /// Snapshot of every queue, ordered by name
    pub fn queues(&self) -> BTreeMap<String, Queue> {
        self.table()
            .iter()
            .map(|(name, queue)| (name.clone(), queue.clone()))
            .collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.queues().into_keys().collect()
    }

    /// Non-owning handle, for adapters the registry itself depends on
    pub fn downgrade(&self) -> WeakRegistry {
        WeakRegistry {
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, Queue>> {
        self.inner.queues.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("queues", &self.names())
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Weak handle to a [`Registry`]
#[derive(Clone, Default)]
pub struct WeakRegistry {
    inner: Weak<RegistryInner>,
}

impl WeakRegistry {
    /// `None` once every strong handle is gone
    pub fn upgrade(&self) -> Option<Registry> {
        self.inner.upgrade().map(|inner| Registry { inner })
    }
}

impl std::fmt::Debug for WeakRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakRegistry")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
