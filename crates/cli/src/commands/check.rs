// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gateq check <file>` - Validate a queue file without running it

use crate::error::GateqError;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Queue file (TOML)
    pub file: PathBuf,
}

pub fn check(args: CheckArgs) -> Result<()> {
    let file = super::load(&args.file)?;
    let queues = file
        .validate()
        .map_err(|e| GateqError::invalid_file(&args.file, e))?;

    println!(
        "{}: {} queue(s), retry delay {}",
        args.file.display(),
        queues.len(),
        humantime::format_duration(file.registry_config().retry_delay)
    );
    for queue in &queues {
        println!(
            "  {:<20} actions={:<4} options={} conditions={}",
            queue.name(),
            queue.len(),
            queue.options(),
            queue.conditions()
        );
    }
    Ok(())
}
