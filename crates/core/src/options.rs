// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue ordering options

use crate::error::QueueError;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// A single recognized queue option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueOption {
    /// Always pick the first action, even if it is gated
    StrictOrder,
    /// Execute at most one action per `run`
    SingleStep,
}

impl QueueOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueOption::StrictOrder => "strict_order",
            QueueOption::SingleStep => "single_step",
        }
    }
}

impl fmt::Display for QueueOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueueOption {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict_order" => Ok(QueueOption::StrictOrder),
            "single_step" => Ok(QueueOption::SingleStep),
            other => Err(QueueError::invalid_argument(format!(
                "unknown queue option: {other:?} (expected strict_order or single_step)"
            ))),
        }
    }
}

/// The immutable option set of a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueOptions {
    pub strict_order: bool,
    pub single_step: bool,
}

impl QueueOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict_order(mut self) -> Self {
        self.strict_order = true;
        self
    }

    pub fn single_step(mut self) -> Self {
        self.single_step = true;
        self
    }

    pub fn contains(&self, option: QueueOption) -> bool {
        match option {
            QueueOption::StrictOrder => self.strict_order,
            QueueOption::SingleStep => self.single_step,
        }
    }

    fn insert(&mut self, option: QueueOption) {
        match option {
            QueueOption::StrictOrder => self.strict_order = true,
            QueueOption::SingleStep => self.single_step = true,
        }
    }

    /// Set members in canonical order
    pub fn iter(&self) -> impl Iterator<Item = QueueOption> + '_ {
        [QueueOption::StrictOrder, QueueOption::SingleStep]
            .into_iter()
            .filter(|option| self.contains(*option))
    }
}

impl FromIterator<QueueOption> for QueueOptions {
    fn from_iter<I: IntoIterator<Item = QueueOption>>(iter: I) -> Self {
        let mut options = QueueOptions::default();
        for option in iter {
            options.insert(option);
        }
        options
    }
}

impl From<QueueOption> for QueueOptions {
    fn from(option: QueueOption) -> Self {
        std::iter::once(option).collect()
    }
}

/// Accepts nil (no options), one option string, or a list of option strings
impl TryFrom<Value> for QueueOptions {
    type Error = QueueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Nil => Ok(QueueOptions::default()),
            Value::Str(option) => Ok(option.parse::<QueueOption>()?.into()),
            Value::List(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Str(option) => option.parse::<QueueOption>(),
                    other => Err(QueueError::invalid_argument(format!(
                        "queue options must be strings, found {}",
                        other.kind()
                    ))),
                })
                .collect(),
            other => Err(QueueError::invalid_argument(format!(
                "queue options must be a string or a list of strings, found {}",
                other.kind()
            ))),
        }
    }
}

impl From<QueueOptions> for Value {
    fn from(options: QueueOptions) -> Self {
        Value::list(options.iter().map(|option| option.as_str()))
    }
}

impl fmt::Display for QueueOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|option| option.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
