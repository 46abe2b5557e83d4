// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A job as seen by the scheduler: its serializable [`JobSpec`] plus the
//! live backend handle bound at first submission (spec §6 Job contract).

use std::path::Path;

use jobsmith_backend::{Backend, BackendStatus};
use jobsmith_core::{JobKind, JobSpec, Status};

use crate::backend_factory::BackendFactory;
use crate::error::SchedulerError;

pub struct Job {
    pub spec: JobSpec,
    status: Status,
    backend: Option<Box<dyn Backend>>,
}

impl Job {
    pub fn new(spec: JobSpec) -> Self {
        Self { spec, status: Status::Configured, backend: None }
    }

    /// Rehydrates a job at a status recovered from a snapshot (spec §4.6).
    /// The backend handle is never restored, so a `Running` job has no live
    /// submission to poll; this is the same "unknown" case `get_status`
    /// handles for a stale backend id, so it folds back to `Configured` for
    /// the next tick to resubmit.
    pub fn restored(spec: JobSpec, status: Status) -> Self {
        let status = if status == Status::Running { Status::Configured } else { status };
        Self { spec, status, backend: None }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// `Some(kind)` pins the job; absent defers to the concurrency
    /// controller, which defaults an unpinned job to batch.
    pub fn kind(&self) -> JobKind {
        self.spec.kind_pref.unwrap_or(JobKind::Batch)
    }

    pub fn is_local(&self) -> bool {
        self.kind() == JobKind::Local
    }

    /// Pins this job to local execution. Mirrors the original's `set_local()`.
    pub fn set_local(&mut self) {
        self.spec.kind_pref = Some(JobKind::Local);
    }

    pub fn do_retry(&self) -> bool {
        self.spec.do_retry()
    }

    /// Builds and dispatches a concrete backend for this job's current
    /// [`kind`](Self::kind), binding it for the rest of this job's run.
    pub async fn submit(&mut self, factory: &BackendFactory, scripts_dir: &Path) -> Result<(), SchedulerError> {
        let mut backend = factory.build(self.kind(), &self.spec);
        backend.write_script(scripts_dir).await?;
        backend.submit().await?;
        self.backend = Some(backend);
        self.status = Status::Running;
        Ok(())
    }

    /// Revoke the job's submission. A no-op if it was never submitted.
    /// `clear_retry` exhausts the retry budget so a cascade-cancelled
    /// dependent is never resurrected by the retry pass (spec §4.2).
    pub async fn cancel(&mut self, clear_retry: bool) -> Result<(), SchedulerError> {
        if let Some(backend) = self.backend.as_mut() {
            backend.cancel().await?;
        }
        self.status = Status::Cancelled;
        if clear_retry {
            self.spec.retries_used = self.spec.max_retries;
        }
        Ok(())
    }

    /// Re-enter `Configured` if a retry credit remains. Drops the old
    /// backend handle so the next tick submits a fresh one.
    pub fn retry(&mut self) -> bool {
        if self.status.is_retryable() && self.spec.do_retry() {
            self.spec.consume_retry();
            self.status = Status::Configured;
            self.backend = None;
            true
        } else {
            false
        }
    }

    /// Refresh status from the backend (spec §6 Job contract).
    ///
    /// `skip_eval = true` returns the cached status without consulting
    /// anything. Otherwise an already-terminal status short-circuits
    /// unless `force_success_check` is set, in which case the backend and
    /// success policy are re-consulted even for a job already judged
    /// Success/Failed/Cancelled.
    pub async fn get_status(&mut self, skip_eval: bool, force_success_check: bool) -> Result<Status, SchedulerError> {
        if skip_eval {
            return Ok(self.status);
        }
        if self.status.is_terminal() && !force_success_check {
            return Ok(self.status);
        }
        let Some(backend) = self.backend.as_mut() else {
            return Ok(self.status);
        };
        self.status = match backend.get_status().await? {
            BackendStatus::Running => Status::Running,
            BackendStatus::Cancelled => Status::Cancelled,
            // The backend lost track of this submission — at-least-once
            // resume treats it as never-submitted so the next tick retries.
            BackendStatus::Unknown => Status::Configured,
            BackendStatus::Finished { success } => {
                self.spec.success_policy.evaluate(success, self.spec.output.as_deref())
            }
        };
        Ok(self.status)
    }
}

#[cfg(test)]
impl Job {
    /// Pins a status directly, bypassing the backend — lets sibling-module
    /// tests (e.g. dependency resolution) set up a job tree without a real
    /// submission round-trip.
    pub(crate) fn set_status_for_test(&mut self, status: Status) {
        self.status = status;
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
