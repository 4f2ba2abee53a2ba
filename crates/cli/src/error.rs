// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! This module provides enhanced error types that include:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use gateq_core::{LoadError, QueueError};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct GateqError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GateqError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for GateqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for GateqError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builders for the failures the commands report
impl GateqError {
    pub fn unreadable(path: &Path, source: std::io::Error) -> Self {
        GateqError::new(format!("Cannot read queue file '{}'", path.display()))
            .with_context(source.to_string())
            .with_suggestion("Check the path and file permissions")
            .with_source(source)
    }

    pub fn invalid_file(path: &Path, source: LoadError) -> Self {
        let error = GateqError::new(format!("Invalid queue file '{}'", path.display()))
            .with_context(source.to_string());
        let error = match &source {
            LoadError::Toml(_) => error
                .with_suggestion("Each queue is a [[queue]] table with name and conditions"),
            LoadError::Queue {
                source: QueueError::DuplicateName(_),
                ..
            } => error.with_suggestion("Give every [[queue]] a unique name"),
            LoadError::Queue { .. } => error.with_suggestion(
                "Conditions are true/false, a state path, or a list of state paths",
            ),
            LoadError::Action { .. } => error.with_suggestion(
                "Actions are a command, a list of commands, or a table with code and optional required/consumed",
            ),
        };
        error.with_suggestion(format!("Validate with: gateq check {}", path.display()))
            .with_source(source)
    }

    pub fn queue_not_found(name: &str, known: &[String]) -> Self {
        let error = GateqError::new(format!("Queue '{}' not found", name));
        let error = if known.is_empty() {
            error.with_context("The file defines no queues")
        } else {
            error.with_context(format!("Defined queues: {}", known.join(", ")))
        };
        error.with_suggestion("Omit --queue to run every queue")
    }

    pub fn checks_pending(pending: usize, timeout: Duration) -> Self {
        GateqError::new(format!(
            "{} consumption check(s) still pending after {}",
            pending,
            humantime::format_duration(timeout)
        ))
        .with_context("A consumed flag is never cleared, so its action keeps retrying")
        .with_suggestion("Make the action clear its consumed flag, e.g. `set sys.flag false`")
        .with_suggestion("Raise the limit with --timeout")
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
