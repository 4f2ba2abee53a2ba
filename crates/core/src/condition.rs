// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Condition trees and their evaluation
//!
//! A condition is a tree of boolean leaves combined by logical AND. Every
//! leaf is visited on each evaluation, even after a false leaf has been
//! seen, so side-effecting predicates later in a list still run.

use crate::host::StateResolver;
use std::fmt;
use std::sync::Arc;

/// Zero-argument boolean callable used as a condition leaf
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn() -> bool + Send + Sync>);

impl Predicate {
    pub fn new(f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self) -> bool {
        (self.0)()
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Predicates compare by identity
impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A boolean-valued expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Literal(bool),
    Predicate(Predicate),
    /// Dotted path resolved through the host's [`StateResolver`]
    Path(String),
    /// Conjunction over all members
    All(Vec<Condition>),
}

impl Condition {
    pub fn path(path: impl Into<String>) -> Self {
        Condition::Path(path.into())
    }

    pub fn predicate(f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        Condition::Predicate(Predicate::new(f))
    }

    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::All(conditions.into_iter().collect())
    }

    /// Evaluate the tree. Lists are AND-ed without short-circuiting.
    pub fn evaluate(&self, state: &dyn StateResolver) -> bool {
        match self {
            Condition::Literal(value) => *value,
            Condition::Predicate(predicate) => predicate.call(),
            Condition::Path(path) => state.get_bool(path),
            Condition::All(members) => members.iter().fold(true, |acc, member| {
                let leaf = member.evaluate(state);
                acc && leaf
            }),
        }
    }

    /// Leaves in document order, with nested lists flattened
    pub fn leaves(&self) -> Vec<&Condition> {
        match self {
            Condition::All(members) => members.iter().flat_map(Condition::leaves).collect(),
            leaf => vec![leaf],
        }
    }

    /// Evaluate every leaf and count how many are truthy.
    ///
    /// Returns `(truthy, total)`.
    pub fn truthy_leaves(&self, state: &dyn StateResolver) -> (usize, usize) {
        let leaves = self.leaves();
        let truthy = leaves.iter().filter(|leaf| leaf.evaluate(state)).count();
        (truthy, leaves.len())
    }
}

impl From<bool> for Condition {
    fn from(value: bool) -> Self {
        Condition::Literal(value)
    }
}

impl From<&str> for Condition {
    fn from(path: &str) -> Self {
        Condition::Path(path.to_string())
    }
}

impl From<String> for Condition {
    fn from(path: String) -> Self {
        Condition::Path(path)
    }
}

impl From<Predicate> for Condition {
    fn from(predicate: Predicate) -> Self {
        Condition::Predicate(predicate)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Literal(value) => write!(f, "{}", value),
            Condition::Predicate(_) => f.write_str("<predicate>"),
            Condition::Path(path) => f.write_str(path),
            Condition::All(members) => {
                f.write_str("[")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", member)?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
