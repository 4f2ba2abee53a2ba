// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TOML queue definitions
//!
//! ```toml
//! retry_delay = "500ms"
//!
//! [state]
//! sys = { balance = true }
//!
//! [[queue]]
//! name = "balance"
//! conditions = "sys.balance"
//! options = ["strict_order"]
//! actions = [
//!   "echo hi",
//!   { code = "set sys.balance false", consumed = "sys.balance" },
//! ]
//! ```
//!
//! Queues and actions go through the same validation as programmatic
//! input; the file layer only adds location to the errors.

use crate::error::QueueError;
use crate::host::{HostDeps, NoOpCommandSink, NoOpScheduler};
use crate::queue::{Queue, DEFAULT_RETRY_DELAY};
use crate::registry::{Registry, RegistryConfig};
use crate::state::SharedState;
use crate::value::Value;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors from loading a queue file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("queue {queue:?}: {source}")]
    Queue {
        queue: String,
        #[source]
        source: QueueError,
    },
    #[error("queue {queue:?}, actions[{index}]: {source}")]
    Action {
        queue: String,
        index: usize,
        #[source]
        source: QueueError,
    },
}

/// Parsed queue file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueueFile {
    #[serde(default, with = "humantime_serde")]
    pub retry_delay: Option<Duration>,
    /// Initial state tree
    #[serde(default)]
    pub state: toml::Table,
    #[serde(default, rename = "queue")]
    pub queues: Vec<QueueDef>,
}

/// One `[[queue]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueueDef {
    pub name: String,
    pub conditions: toml::Value,
    #[serde(default)]
    pub options: Option<toml::Value>,
    #[serde(default)]
    pub actions: Vec<toml::Value>,
}

impl QueueFile {
    pub fn parse(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
        }
    }

    /// The `[state]` table as a JSON tree, ready for [`SharedState::from_value`]
    pub fn initial_state(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.state
                .iter()
                .map(|(key, value)| (key.clone(), to_json(value)))
                .collect(),
        )
    }

    /// Create every queue and add its actions, in file order.
    ///
    /// On failure, queues created by this call are deleted again so the
    /// registry is left as it was.
    pub fn install(&self, registry: &Registry) -> Result<Vec<Queue>, LoadError> {
        let mut installed = Vec::with_capacity(self.queues.len());
        for def in &self.queues {
            match def.install(registry) {
                Ok(queue) => installed.push(queue),
                Err(err) => {
                    for queue in &installed {
                        let _ = registry.delete(queue.name());
                    }
                    return Err(err);
                }
            }
        }
        tracing::debug!(queues = installed.len(), "queue file installed");
        Ok(installed)
    }

    /// Validate every queue and action against a scratch registry that
    /// executes nothing. Returns the normalized queues.
    pub fn validate(&self) -> Result<Vec<Queue>, LoadError> {
        let host = HostDeps::new(
            SharedState::from_value(self.initial_state()),
            NoOpCommandSink,
            NoOpScheduler,
        );
        self.install(&Registry::new(host, self.registry_config()))
    }
}

impl QueueDef {
    fn install(&self, registry: &Registry) -> Result<Queue, LoadError> {
        let queue = registry
            .create(
                &self.name,
                Value::from(self.conditions.clone()),
                self.options.clone().map(Value::from),
            )
            .map_err(|source| LoadError::Queue {
                queue: self.name.clone(),
                source,
            })?;

        for (index, action) in self.actions.iter().enumerate() {
            if let Err(source) = queue.add(Value::from(action.clone())) {
                let _ = registry.delete(&self.name);
                return Err(LoadError::Action {
                    queue: self.name.clone(),
                    index,
                    source,
                });
            }
        }
        Ok(queue)
    }
}

fn to_json(value: &toml::Value) -> serde_json::Value {
    use serde_json::Value as Json;
    match value {
        toml::Value::String(s) => Json::String(s.clone()),
        toml::Value::Integer(i) => Json::from(*i),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number),
        toml::Value::Boolean(b) => Json::Bool(*b),
        toml::Value::Datetime(dt) => Json::String(dt.to_string()),
        toml::Value::Array(items) => Json::Array(items.iter().map(to_json).collect()),
        toml::Value::Table(table) => Json::Object(
            table
                .iter()
                .map(|(key, value)| (key.clone(), to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
#[path = "queue_file_tests.rs"]
mod tests;
