// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `JobHandler`: the façade a caller (the CLI, or a future embedder)
//! drives — owns the [`Scheduler`], the [`Snapshotter`], and the two-stage
//! shutdown protocol around `run_jobs` (spec §3, §4.6, §4.7).

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use std::io::Write;

use jobsmith_backend::BackendDefaults;
use jobsmith_core::{CoreError, JobSpec, Status};
use jobsmith_storage::{HandlerSnapshot, Snapshotter};
use tracing::{debug, info};

use crate::backend_factory::BackendFactory;
use crate::error::SchedulerError;
use crate::scheduler::{RunSummary, Scheduler};
use crate::signal::{ShutdownPhase, SignalSupervisor};

/// Directory layout, global defaults, and identity for one handler
/// (spec §3 `JobHandlerConfig`).
#[derive(Debug, Clone)]
pub struct JobHandlerConfig {
    pub name: String,
    pub base_folder: PathBuf,
    pub local_max: usize,
    pub run_max: Option<usize>,
    pub max_retries: u32,
    pub is_verbose: bool,
    pub use_snapshot: bool,
    pub tick_interval: Duration,
}

impl JobHandlerConfig {
    fn backend_defaults(&self) -> BackendDefaults {
        BackendDefaults { script_folder: self.base_folder.join("scripts"), log_folder: self.base_folder.join("logs") }
    }
}

pub struct JobHandler {
    config: JobHandlerConfig,
    scheduler: Scheduler,
    snapshotter: Snapshotter,
    restoring: bool,
}

impl JobHandler {
    /// Construct a handler and, if `use_snapshot` is set, attempt to
    /// rehydrate it from disk (spec §3). A missing or corrupt snapshot
    /// falls back to a fresh working tree, exactly as if `use_snapshot`
    /// had been false.
    pub fn new(config: JobHandlerConfig) -> Self {
        let snapshotter = Snapshotter::new(&config.base_folder);
        let factory = BackendFactory::new(config.backend_defaults());
        let scheduler = Scheduler::new(factory, config.base_folder.join("scripts"), config.local_max, config.run_max);
        let mut handler = Self { config, scheduler, snapshotter, restoring: false };
        if handler.config.use_snapshot {
            handler.restore();
        } else {
            handler.reset_working_tree();
        }
        handler
    }

    /// Re-enter restore mode against this handler's existing snapshot path.
    /// While restoring, [`add_job`](Self::add_job) returns
    /// `CoreError::RestoreInProgress` (spec §9).
    pub fn restore(&mut self) {
        self.restoring = true;
        if let Some((snapshot, specs)) = self.snapshotter.restore() {
            self.apply_snapshot(snapshot, specs);
        } else {
            self.reset_working_tree();
        }
        self.restoring = false;
    }

    /// `rm -r base_folder` (spec.md:55/206): the path taken whenever a run
    /// starts without rehydrating from a snapshot, so stale scripts, logs,
    /// and snapshot files from a prior run never leak into this one.
    fn reset_working_tree(&self) {
        std::fs::remove_dir_all(&self.config.base_folder).ok();
    }

    fn apply_snapshot(&mut self, snapshot: HandlerSnapshot, specs: Vec<JobSpec>) {
        self.config.local_max = snapshot.local_max;
        self.config.run_max = snapshot.run_max;
        self.config.max_retries = snapshot.max_retries;
        self.config.is_verbose = snapshot.is_verbose;

        let factory = BackendFactory::new(self.config.backend_defaults());
        self.scheduler = Scheduler::new(factory, self.config.base_folder.join("scripts"), self.config.local_max, self.config.run_max);

        let mut status_of = std::collections::HashMap::new();
        for (status_name, names) in &snapshot.job_states {
            let Some(status) = status_from_name(status_name) else { continue };
            for name in names {
                status_of.insert(name.clone(), status);
            }
        }
        for spec in specs {
            let status = status_of.get(&spec.name).copied().unwrap_or(Status::Configured);
            if let Err(e) = self.scheduler.add_restored_job(spec, status) {
                tracing::warn!(error = %e, "dropping job that failed to rehydrate");
            }
        }
    }

    pub fn add_job(&mut self, spec: JobSpec) -> Result<(), SchedulerError> {
        if self.restoring {
            return Err(CoreError::RestoreInProgress.into());
        }
        self.scheduler.add_job(spec)
    }

    pub fn store(&self) -> &crate::store::JobStore {
        &self.scheduler.store
    }

    /// `submit_jobs`: run one tick, optionally blocking until every local
    /// job matched by `tags` reaches a terminal status (spec §4.4).
    pub async fn submit_jobs(&mut self, wait: bool, tags: &HashSet<String>, make_snapshot: bool) -> Result<(), SchedulerError> {
        self.scheduler.tick().await?;
        if wait {
            self.scheduler.wait_for_local(tags).await?;
        }
        if make_snapshot {
            self.make_snapshot()?;
        }
        Ok(())
    }

    pub async fn cancel_jobs(&mut self, tags: &HashSet<String>, only_local: bool, only_batch: bool, make_snapshot: bool) -> Result<(), SchedulerError> {
        self.scheduler.cancel_jobs(tags, only_local, only_batch).await?;
        if make_snapshot {
            self.make_snapshot()?;
        }
        Ok(())
    }

    pub fn retry_jobs(&mut self, tags: &HashSet<String>, make_snapshot: bool) -> Result<(), SchedulerError> {
        self.scheduler.retry_jobs(tags);
        if make_snapshot {
            self.make_snapshot()?;
        }
        Ok(())
    }

    /// Persist handler + every job's config (spec §4.6).
    pub fn make_snapshot(&self) -> Result<(), SchedulerError> {
        let mut job_names = Vec::new();
        let mut job_states: std::collections::HashMap<String, Vec<String>> = std::collections::HashMap::new();
        for name in self.scheduler.store.names_in_order() {
            let Some(job) = self.scheduler.store.get(name) else { continue };
            job_names.push(name.to_string());
            job_states.entry(status_name(job.status()).to_string()).or_default().push(name.to_string());
            self.snapshotter.write_job(&job.spec)?;
        }
        let snapshot = HandlerSnapshot {
            name: self.config.name.clone(),
            base_folder: self.config.base_folder.clone(),
            local_max: self.config.local_max,
            run_max: self.config.run_max,
            max_retries: self.config.max_retries,
            is_verbose: self.config.is_verbose,
            local_counter: self.scheduler.concurrency.local_counter(),
            job_names,
            job_states,
        };
        self.snapshotter.write_handler(&snapshot)?;
        Ok(())
    }

    /// Run-to-completion loop (spec §4.4 `run_jobs`): tick on an interval
    /// until every job is terminal, honoring the two-stage interrupt
    /// protocol; always writes a final snapshot on every exit path.
    pub async fn run_jobs(&mut self) -> Result<RunSummary, SchedulerError> {
        let start = Instant::now();
        let result = self.run_jobs_inner(start).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "run_jobs failed, cancelling all running jobs");
            let _ = self.scheduler.cancel_jobs(&HashSet::new(), false, false).await;
        }
        if !self.config.is_verbose {
            println!();
        }
        if let Err(e) = self.make_snapshot() {
            tracing::warn!(error = %e, "failed to write final snapshot");
        }
        let summary = result?;
        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            cancelled = summary.cancelled,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "run_jobs complete"
        );
        Ok(summary)
    }

    async fn run_jobs_inner(&mut self, start: Instant) -> Result<RunSummary, SchedulerError> {
        let mut signals = SignalSupervisor::new();
        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.config.tick_interval) => {
                    if signals.phase() == ShutdownPhase::Running {
                        self.scheduler.tick().await?;
                    } else {
                        self.scheduler.reconcile().await?;
                    }
                }
                phase_before_interrupt = signals.wait_for_next_interrupt(), if signals.phase() != ShutdownPhase::HardCancel => {
                    match phase_before_interrupt {
                        ShutdownPhase::Draining => {
                            info!("second interrupt: hard-cancelling in-flight local jobs");
                            self.scheduler.cancel_jobs(&HashSet::new(), true, false).await?;
                        }
                        _ => info!("interrupt received: draining in-flight jobs, no new submissions"),
                    }
                }
            }

            self.report_progress(start);

            if self.scheduler.is_complete() {
                break;
            }
            if signals.phase() == ShutdownPhase::HardCancel && !self.scheduler.any_local_running() {
                break;
            }
        }
        Ok(self.scheduler.summary(start.elapsed()))
    }

    /// Single-line progress, refreshed once per tick (spec §4.4). Verbose
    /// mode routes this through the log stream instead of the terminal, so
    /// it doesn't interleave with structured log lines (spec §7).
    fn report_progress(&self, start: Instant) {
        let summary = self.scheduler.summary(start.elapsed());
        let total = self.scheduler.store.len();
        let done = summary.succeeded + summary.failed + summary.cancelled;
        if self.config.is_verbose {
            debug!(done, total, succeeded = summary.succeeded, failed = summary.failed, cancelled = summary.cancelled, "progress");
        } else {
            print!("\r{done}/{total} done (success {}, failed {}, cancelled {})  ", summary.succeeded, summary.failed, summary.cancelled);
            let _ = std::io::stdout().flush();
        }
    }
}

fn status_name(status: Status) -> &'static str {
    match status {
        Status::Configured => "configured",
        Status::Running => "running",
        Status::Finished => "finished",
        Status::Success => "success",
        Status::Failed => "failed",
        Status::Cancelled => "cancelled",
    }
}

fn status_from_name(name: &str) -> Option<Status> {
    Some(match name {
        "configured" => Status::Configured,
        "running" => Status::Running,
        "finished" => Status::Finished,
        "success" => Status::Success,
        "failed" => Status::Failed,
        "cancelled" => Status::Cancelled,
        _ => return None,
    })
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
