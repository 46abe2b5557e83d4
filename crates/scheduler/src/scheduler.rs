// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scheduling loop: reconciles status, advances ready jobs, applies
//! retry, drives submission, detects terminal completion (spec §4.4).

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use jobsmith_core::{JobSpec, Status};
use tracing::{debug, info};

use crate::backend_factory::BackendFactory;
use crate::concurrency::ConcurrencyController;
use crate::dependency::{self, Readiness};
use crate::error::SchedulerError;
use crate::job::Job;
use crate::store::JobStore;

/// Outcome of a completed `run_jobs` loop (spec §7 user-visible summary).
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub local: usize,
    pub batch: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub elapsed: Duration,
}

pub struct Scheduler {
    pub store: JobStore,
    pub concurrency: ConcurrencyController,
    factory: BackendFactory,
    scripts_dir: PathBuf,
}

impl Scheduler {
    pub fn new(factory: BackendFactory, scripts_dir: PathBuf, local_max: usize, run_max: Option<usize>) -> Self {
        Self { store: JobStore::new(), concurrency: ConcurrencyController::new(local_max, run_max), factory, scripts_dir }
    }

    pub fn add_job(&mut self, spec: JobSpec) -> Result<(), SchedulerError> {
        self.store.add(Job::new(spec))
    }

    /// Rehydrate a job already bearing a status from a restored snapshot
    /// (spec §4.6); the store indexes it under that status directly rather
    /// than the default Configured.
    pub fn add_restored_job(&mut self, spec: JobSpec, status: Status) -> Result<(), SchedulerError> {
        self.store.add(Job::restored(spec, status))
    }

    /// Refresh status without dispatching new submissions. Used while
    /// draining during graceful shutdown (spec §4.7).
    pub async fn reconcile(&mut self) -> Result<(), SchedulerError> {
        self.store.reconcile_all().await?;
        self.concurrency.reap_local(&self.store);
        Ok(())
    }

    pub fn any_local_running(&self) -> bool {
        self.store.names_in_order().any(|name| self.store.get(name).map(|j| j.is_local() && j.status() == Status::Running).unwrap_or(false))
    }

    /// One scheduling tick.
    pub async fn tick(&mut self) -> Result<(), SchedulerError> {
        self.reconcile().await?;

        let names: Vec<String> = self.store.names_in_order().map(String::from).collect();
        for name in names {
            if self.concurrency.run_cap_reached(self.store.status_bucket(Status::Running).len()) {
                debug!("run_max reached, stopping submission for this tick");
                break;
            }

            let Some(status) = self.store.get(&name).map(|j| j.status()) else { continue };

            if status.is_retryable() {
                self.retry_one(&name);
                // Mirrors the original: a job retried this tick waits for
                // the next tick before it is eligible for submission.
                continue;
            }
            if status != Status::Configured {
                continue;
            }

            let parent_tags = self.store.get(&name).map(|j| j.spec.parent_tags.clone()).unwrap_or_default();
            match dependency::check(&self.store, &parent_tags) {
                Readiness::Ready => {}
                Readiness::NotReady => continue,
                Readiness::Unrecoverable => {
                    self.cascade_cancel(&name).await?;
                    continue;
                }
            }

            if let Some(job) = self.store.get_mut(&name) {
                self.concurrency.assign(job);
            }

            let old_status = Status::Configured;
            if let Some(job) = self.store.get_mut(&name) {
                job.submit(&self.factory, &self.scripts_dir).await?;
                let new_status = job.status();
                let kind = job.kind();
                self.store.reindex(&name, old_status, new_status);
                info!(job = %name, kind = %kind, "job submitted");
            }
        }
        Ok(())
    }

    async fn cascade_cancel(&mut self, name: &str) -> Result<(), SchedulerError> {
        let Some(old) = self.store.get(name).map(|j| j.status()) else { return Ok(()) };
        if let Some(job) = self.store.get_mut(name) {
            info!(job = %name, "cascade-cancelling dependent of an unrecoverable parent");
            job.cancel(true).await?;
            let new = job.status();
            self.store.reindex(name, old, new);
        }
        Ok(())
    }

    fn retry_one(&mut self, name: &str) {
        let Some(old) = self.store.get(name).map(|j| j.status()) else { return };
        let retried = self.store.get_mut(name).map(|j| j.retry()).unwrap_or(false);
        if retried {
            self.store.reindex(name, old, Status::Configured);
        }
    }

    /// `cancel(tags?, only_local?, only_batch?)` (spec §4.5).
    pub async fn cancel_jobs(&mut self, tags: &HashSet<String>, only_local: bool, only_batch: bool) -> Result<(), SchedulerError> {
        if only_local && only_batch {
            return Ok(());
        }
        let names: Vec<String> = self
            .store
            .list(tags, &HashSet::from([Status::Running]))
            .into_iter()
            .filter(|j| !only_local || j.is_local())
            .filter(|j| !only_batch || !j.is_local())
            .map(|j| j.name().to_string())
            .collect();
        for name in names {
            let Some(old) = self.store.get(&name).map(|j| j.status()) else { continue };
            if let Some(job) = self.store.get_mut(&name) {
                job.cancel(false).await?;
                let new = job.status();
                self.store.reindex(&name, old, new);
            }
        }
        Ok(())
    }

    /// `retry(tags?)` (spec §4.5): retry only jobs currently Failed/Cancelled.
    pub fn retry_jobs(&mut self, tags: &HashSet<String>) {
        let states = HashSet::from([Status::Failed, Status::Cancelled]);
        let names: Vec<String> = self.store.list(tags, &states).into_iter().map(|j| j.name().to_string()).collect();
        for name in names {
            self.retry_one(&name);
        }
    }

    /// Block until every local job (optionally tag-filtered) has reached a
    /// terminal status. Never waits on batch jobs (spec §9 decision).
    pub async fn wait_for_local(&mut self, tags: &HashSet<String>) -> Result<(), SchedulerError> {
        loop {
            self.store.reconcile_all().await?;
            let pending = self
                .store
                .list(tags, &HashSet::new())
                .into_iter()
                .any(|j| j.is_local() && !j.status().is_terminal());
            if !pending {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.store.is_empty()
            && self.store.names_in_order().all(|name| self.store.get(name).map(|j| j.status().is_terminal()).unwrap_or(true))
    }

    pub fn summary(&self, elapsed: Duration) -> RunSummary {
        let mut summary = RunSummary { elapsed, ..Default::default() };
        for name in self.store.names_in_order() {
            let Some(job) = self.store.get(name) else { continue };
            if job.is_local() {
                summary.local += 1;
            } else {
                summary.batch += 1;
            }
            match job.status() {
                Status::Success => summary.succeeded += 1,
                Status::Failed => summary.failed += 1,
                Status::Cancelled => summary.cancelled += 1,
                _ => {}
            }
        }
        summary
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
