// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jobsmith`: the CLI surface over [`jobsmith_scheduler::JobHandler`] —
//! `run` / `status` / `cancel` / `retry`, wired to a concrete handler (spec
//! §6 "CLI/interactive surface", explicitly out of scope for the core
//! itself).

mod commands;
mod common;
mod config;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jobsmith", version, about = "Dependency-gated job orchestrator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a job-set and run it to completion.
    Run(commands::run::RunArgs),
    /// Print the current status of every known job.
    Status(commands::status::StatusArgs),
    /// Cancel running jobs matching a tag filter.
    Cancel(commands::cancel::CancelArgs),
    /// Retry failed/cancelled jobs that still have a retry budget.
    Retry(commands::retry::RetryArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))).init();

    let cli = Cli::parse();
    let result = dispatch(cli).await;
    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}

async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Command::Run(args) => commands::run::run(args).await,
        Command::Status(args) => commands::status::run(args),
        Command::Cancel(args) => commands::cancel::run(args).await,
        Command::Retry(args) => commands::retry::run(args),
    }
}
