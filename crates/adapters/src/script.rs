// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command sink for file-driven queues
//!
//! Interprets a small line-oriented command language:
//!
//! | Command                   | Effect                                 |
//! |---------------------------|----------------------------------------|
//! | `set <path> <true/false>` | write a flag into the shared state     |
//! | `run <queue>`             | run another queue through the registry |
//! | `echo <text>`             | write `text` to the output             |
//!
//! Anything else goes to the fallback sink, if one is configured.

use gateq_core::{CommandSink, QueueError, Registry, SharedState, WeakRegistry};
use std::io::Write;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("expected true or false, got {0:?}")]
    InvalidFlag(String),
    #[error("no registry attached")]
    Detached,
    #[error("unhandled command: {0:?}")]
    Unhandled(String),
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

type Output = Arc<Mutex<Box<dyn Write + Send>>>;

/// Script interpreter sink. Clones share state, output and registry.
#[derive(Clone)]
pub struct ScriptSink {
    state: SharedState,
    registry: Arc<Mutex<WeakRegistry>>,
    output: Output,
    fallback: Option<Arc<dyn CommandSink>>,
}

impl ScriptSink {
    /// Sink writing `echo` output to stdout
    pub fn new(state: SharedState) -> Self {
        Self::with_output(state, std::io::stdout())
    }

    pub fn with_output(state: SharedState, output: impl Write + Send + 'static) -> Self {
        Self {
            state,
            registry: Arc::new(Mutex::new(WeakRegistry::default())),
            output: Arc::new(Mutex::new(Box::new(output))),
            fallback: None,
        }
    }

    /// Forward unrecognized commands to `sink`
    pub fn with_fallback(mut self, sink: impl CommandSink + 'static) -> Self {
        self.fallback = Some(Arc::new(sink));
        self
    }

    /// Bind the registry used by `run`. Only a weak handle is kept since
    /// the registry owns this sink.
    pub fn attach(&self, registry: &Registry) {
        *self.registry.lock().unwrap_or_else(|e| e.into_inner()) = registry.downgrade();
    }

    /// Interpret one command
    pub fn execute(&self, command: &str) -> Result<(), ScriptError> {
        let trimmed = command.trim();
        let (verb, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(verb, rest)| (verb, rest.trim()));

        match verb {
            "set" => {
                let (path, flag) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(ScriptError::MissingArgument("set"))?;
                let flag = match flag.trim() {
                    "true" => true,
                    "false" => false,
                    other => return Err(ScriptError::InvalidFlag(other.to_string())),
                };
                tracing::debug!(path, flag, "set");
                self.state.set(path, flag)?;
                Ok(())
            }
            "run" => {
                if rest.is_empty() {
                    return Err(ScriptError::MissingArgument("run"));
                }
                let registry = self
                    .registry
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .upgrade()
                    .ok_or(ScriptError::Detached)?;
                registry.run(Some(rest))?;
                Ok(())
            }
            "echo" => {
                let mut output = self.output.lock().unwrap_or_else(|e| e.into_inner());
                writeln!(output, "{rest}")?;
                output.flush()?;
                Ok(())
            }
            _ => match &self.fallback {
                Some(fallback) => {
                    fallback.send(command);
                    Ok(())
                }
                None => Err(ScriptError::Unhandled(command.to_string())),
            },
        }
    }
}

impl CommandSink for ScriptSink {
    fn send(&self, command: &str) {
        if let Err(e) = self.execute(command) {
            tracing::warn!(command, error = %e, "script command failed");
        }
    }
}

impl std::fmt::Debug for ScriptSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptSink")
            .field("fallback", &self.fallback.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
