// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flags shared by every subcommand that drives a [`JobHandler`]: where its
//! working tree lives, an optional defaults file, and the overrides every
//! field in [`HandlerConfigFile`] accepts from the command line.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use jobsmith_core::normalize_tags;
use jobsmith_scheduler::JobHandler;

use crate::config::HandlerConfigFile;

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Working directory holding scripts/logs/output/snapshot for this handler.
    #[arg(long, global = true, default_value = "./.jobsmith")]
    pub work_dir: PathBuf,

    /// Optional TOML file of handler defaults (spec §6 configuration surface).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub local_max: Option<usize>,

    #[arg(long, global = true)]
    pub run_max: Option<usize>,

    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    #[arg(long, global = true)]
    pub verbose: bool,

    /// Rehydrate from an existing snapshot at `work_dir` if one exists.
    #[arg(long, global = true)]
    pub use_snapshot: bool,
}

impl CommonArgs {
    pub fn load_config(&self) -> anyhow::Result<HandlerConfigFile> {
        match &self.config {
            Some(path) => HandlerConfigFile::load(path),
            None => Ok(HandlerConfigFile::default()),
        }
    }

    /// Build a handler. `force_snapshot` is set by subcommands (`status`,
    /// `cancel`, `retry`) that have no other source of jobs than a prior
    /// `run`'s snapshot, regardless of whether `--use-snapshot` was passed.
    pub fn build_handler(&self, force_snapshot: bool) -> anyhow::Result<JobHandler> {
        let file = self.load_config()?;
        let config = jobsmith_scheduler::JobHandlerConfig {
            name: file.name.clone().unwrap_or_else(|| "jobsmith".to_string()),
            base_folder: file.work_dir.clone().unwrap_or_else(|| self.work_dir.clone()),
            local_max: self.local_max.or(file.local_max).unwrap_or(0),
            run_max: self.run_max.or(file.run_max),
            max_retries: self.max_retries.or(file.max_retries).unwrap_or(0),
            is_verbose: self.verbose || file.is_verbose.unwrap_or(false),
            use_snapshot: force_snapshot || self.use_snapshot || file.use_snapshot.unwrap_or(false),
            tick_interval: file.tick_interval(),
        };
        Ok(JobHandler::new(config))
    }
}

pub fn parse_tag_filter(tags: &[String]) -> HashSet<String> {
    normalize_tags(tags.iter().cloned())
}
