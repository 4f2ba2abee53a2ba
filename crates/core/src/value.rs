// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loosely-typed input values
//!
//! Queue conditions, options and actions arrive in several shapes: bare
//! strings, callables, lists, and tables with named fields. They are
//! accepted as a [`Value`] and validated into the typed [`Condition`],
//! [`Code`] and [`crate::Action`] forms at construction or add time.

use crate::code::{Code, Thunk};
use crate::condition::{Condition, Predicate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
    Predicate(Predicate),
    Call(Thunk),
    List(Vec<Value>),
    Table(BTreeMap<String, Value>),
}

impl Value {
    pub fn predicate(f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        Value::Predicate(Predicate::new(f))
    }

    pub fn call(f: impl Fn() + Send + Sync + 'static) -> Self {
        Value::Call(Thunk::new(f))
    }

    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn table<K: Into<String>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Value::Table(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Short name of the variant, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Predicate(_) => "predicate",
            Value::Call(_) => "callable",
            Value::List(_) => "list",
            Value::Table(_) => "table",
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Predicate> for Value {
    fn from(value: Predicate) -> Self {
        Value::Predicate(value)
    }
}

impl From<Thunk> for Value {
    fn from(value: Thunk) -> Self {
        Value::Call(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

impl From<Condition> for Value {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Literal(value) => Value::Bool(value),
            Condition::Predicate(predicate) => Value::Predicate(predicate),
            Condition::Path(path) => Value::Str(path),
            Condition::All(members) => Value::list(members),
        }
    }
}

impl From<Code> for Value {
    fn from(code: Code) -> Self {
        match code {
            Code::Command(command) => Value::Str(command),
            Code::Call(thunk) => Value::Call(thunk),
            Code::Sequence(steps) => Value::list(steps),
        }
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::Str(s),
            toml::Value::Integer(i) => Value::Number(i as f64),
            toml::Value::Float(f) => Value::Number(f),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::Str(dt.to_string()),
            toml::Value::Array(items) => Value::list(items),
            toml::Value::Table(table) => Value::table(table),
        }
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
