// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gateq run <file>` - Install a queue file and run its queues

use crate::error::GateqError;
use anyhow::Result;
use clap::Args;
use gateq_adapters::{ScriptSink, TokioScheduler, TracedCommandSink, TracedScheduler};
use gateq_core::{HostDeps, Registry, SharedState};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args)]
pub struct RunArgs {
    /// Queue file (TOML)
    pub file: PathBuf,

    /// Run only this queue (default: all queues)
    #[arg(long)]
    pub queue: Option<String>,

    /// How long to wait for pending consumption checks
    #[arg(long, default_value = "30s", value_parser = humantime::parse_duration)]
    pub timeout: Duration,
}

pub async fn run(args: RunArgs) -> Result<()> {
    let file = super::load(&args.file)?;

    let state = SharedState::from_value(file.initial_state());
    let sink = ScriptSink::new(state.clone());
    let scheduler = TokioScheduler::current()?;
    let registry = Registry::new(
        HostDeps::new(
            state,
            TracedCommandSink::new(sink.clone()),
            TracedScheduler::new(scheduler.clone()),
        ),
        file.registry_config(),
    );
    sink.attach(&registry);

    file.install(&registry)
        .map_err(|e| GateqError::invalid_file(&args.file, e))?;

    match args.queue.as_deref() {
        Some(name) if !registry.contains(name) => {
            return Err(GateqError::queue_not_found(name, &registry.names()).into());
        }
        name => registry.run(name)?,
    }

    if !scheduler.run_until_idle(args.timeout).await {
        return Err(GateqError::checks_pending(scheduler.pending(), args.timeout).into());
    }

    for (name, queue) in registry.queues() {
        println!("{:<20} {} remaining", name, queue.len());
    }
    Ok(())
}
