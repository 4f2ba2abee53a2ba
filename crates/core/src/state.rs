// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory state tree addressed by dotted paths

use crate::error::QueueError;
use crate::host::StateResolver;
use serde_json::{Map, Value};
use std::sync::{Arc, RwLock};

/// Shared, cloneable state tree.
///
/// Every clone observes the same tree. Paths are dotted (`"sys.balance"`);
/// `false`, `null` and missing paths read as falsy, any other value as
/// truthy.
#[derive(Clone)]
pub struct SharedState {
    root: Arc<RwLock<Value>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::from_value(Value::Object(Map::new()))
    }

    /// Wrap an existing tree. Non-table roots are replaced by an empty table.
    pub fn from_value(value: Value) -> Self {
        let root = match value {
            Value::Object(_) => value,
            _ => Value::Object(Map::new()),
        };
        Self {
            root: Arc::new(RwLock::new(root)),
        }
    }

    /// Read the value at `path`, if present
    pub fn get(&self, path: &str) -> Option<Value> {
        let root = self.root.read().unwrap_or_else(|e| e.into_inner());
        lookup(&root, path).cloned()
    }

    /// Write `value` at `path`, creating intermediate tables as needed.
    ///
    /// Fails if the path is empty or walks through a non-table value.
    pub fn set(&self, path: &str, value: impl Into<Value>) -> Result<(), QueueError> {
        let segments = split(path)
            .ok_or_else(|| QueueError::invalid_argument(format!("invalid state path: {path:?}")))?;
        let Some((last, parents)) = segments.split_last() else {
            return Err(QueueError::invalid_argument("state path is empty"));
        };

        let mut root = self.root.write().unwrap_or_else(|e| e.into_inner());
        let mut node = &mut *root;
        for segment in parents {
            let Value::Object(table) = node else {
                return Err(QueueError::invalid_argument(format!(
                    "{path}: `{segment}` is not inside a table"
                )));
            };
            node = table
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        match node {
            Value::Object(table) => {
                table.insert(last.to_string(), value.into());
                Ok(())
            }
            _ => Err(QueueError::invalid_argument(format!(
                "{path}: parent of `{last}` is not a table"
            ))),
        }
    }

    /// Deep copy of the whole tree
    pub fn snapshot(&self) -> Value {
        self.root.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl StateResolver for SharedState {
    fn get_bool(&self, path: &str) -> bool {
        let root = self.root.read().unwrap_or_else(|e| e.into_inner());
        lookup(&root, path).is_some_and(truthy)
    }
}

/// `false` and `null` are falsy; everything else is truthy
pub fn truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

fn split(path: &str) -> Option<Vec<&str>> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some(segments)
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    split(path)?
        .into_iter()
        .try_fold(root, |node, segment| node.as_object()?.get(segment))
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
