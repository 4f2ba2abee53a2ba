// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! gateq-core: condition-gated action queues
//!
//! This crate provides:
//! - Named queues whose actions run only when queue-level and per-action
//!   conditions hold
//! - Deferred re-checks for actions that consume a resource flag
//! - A process-wide [`Registry`] of queues
//! - Host capability traits (state lookup, command sink, deferred
//!   scheduling) and in-memory implementations
//! - TOML queue files

pub mod action;
pub mod code;
pub mod condition;
pub mod error;
pub mod host;
pub mod options;
pub mod queue;
pub mod queue_file;
pub mod registry;
pub mod state;
pub mod value;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use action::{Action, IntoAction};
pub use code::{Code, Thunk};
pub use condition::{Condition, Predicate};
pub use error::QueueError;
pub use host::{
    CommandSink, Deferred, DeferredScheduler, HostDeps, NoOpCommandSink, NoOpScheduler,
    StateResolver,
};
pub use options::{QueueOption, QueueOptions};
pub use queue::{Queue, DEFAULT_RETRY_DELAY};
pub use queue_file::{LoadError, QueueDef, QueueFile};
pub use registry::{Registry, RegistryConfig, WeakRegistry};
pub use state::SharedState;
pub use value::Value;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeClock, FakeCommandSink, ManualScheduler};
