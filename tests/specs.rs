//! Behavioral specifications for the gateq CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// queue/
#[path = "specs/queue/check.rs"]
mod queue_check;
#[path = "specs/queue/run.rs"]
mod queue_run;
