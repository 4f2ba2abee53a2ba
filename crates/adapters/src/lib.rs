// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Host adapters for gateq queues

pub mod script;
pub mod timer;
pub mod traced;

pub use script::{ScriptError, ScriptSink};
pub use timer::{TimerError, TokioScheduler};
pub use traced::{TracedCommandSink, TracedScheduler};
