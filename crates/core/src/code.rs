// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Code trees and their execution

use crate::host::CommandSink;
use std::fmt;
use std::sync::Arc;

/// Zero-argument callable used as a code leaf
#[derive(Clone)]
pub struct Thunk(Arc<dyn Fn() + Send + Sync>);

impl Thunk {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk(..)")
    }
}

/// Thunks compare by identity
impl PartialEq for Thunk {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// An executable expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Code {
    /// Raw command forwarded verbatim to the [`CommandSink`]
    Command(String),
    Call(Thunk),
    /// Members run in order
    Sequence(Vec<Code>),
}

impl Code {
    pub fn command(command: impl Into<String>) -> Self {
        Code::Command(command.into())
    }

    pub fn call(f: impl Fn() + Send + Sync + 'static) -> Self {
        Code::Call(Thunk::new(f))
    }

    pub fn sequence(steps: impl IntoIterator<Item = Code>) -> Self {
        Code::Sequence(steps.into_iter().collect())
    }

    /// Fire every leaf in document order
    pub fn execute(&self, sink: &dyn CommandSink) {
        match self {
            Code::Command(command) => {
                tracing::trace!(command, "forwarding command");
                sink.send(command);
            }
            Code::Call(thunk) => thunk.call(),
            Code::Sequence(steps) => {
                for step in steps {
                    step.execute(sink);
                }
            }
        }
    }
}

impl From<&str> for Code {
    fn from(command: &str) -> Self {
        Code::Command(command.to_string())
    }
}

impl From<String> for Code {
    fn from(command: String) -> Self {
        Code::Command(command)
    }
}

impl From<Thunk> for Code {
    fn from(thunk: Thunk) -> Self {
        Code::Call(thunk)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Command(command) => write!(f, "{:?}", command),
            Code::Call(_) => f.write_str("<callable>"),
            Code::Sequence(steps) => {
                f.write_str("[")?;
                for (i, step) in steps.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", step)?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
#[path = "code_tests.rs"]
mod tests;
