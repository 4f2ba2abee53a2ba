// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic! in test code
#![cfg_attr(test, allow(clippy::panic))]

//! gateq - run condition-gated action queues from TOML files

mod commands;
mod error;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, run};
use error::GateqError;

#[derive(Parser)]
#[command(name = "gateq", version, about = "Condition-gated action queues")]
struct Cli {
    /// Log scheduling decisions (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a queue file
    Check(check::CheckArgs),
    /// Install a queue file and run its queues
    Run(run::RunArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result: Result<()> = match cli.command {
        Commands::Check(args) => check::check(args),
        Commands::Run(args) => run::run(args).await,
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}

fn report(error: &anyhow::Error) {
    match error.downcast_ref::<GateqError>() {
        Some(user) => eprint!("{user}"),
        None => eprintln!("error: {error:#}"),
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "info" })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
