// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobsmith-backend: the uniform execution-backend contract (spec §6) plus
//! the two concrete backends this crate ships — a local child-process
//! backend and a simulated batch-queue backend. The scheduler never depends
//! on anything in this crate beyond the [`Backend`] trait.

pub mod batch;
pub mod local;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("io error writing job artifacts: {0}")]
    Io(#[from] std::io::Error),
    #[error("backend submission failed: {0}")]
    Submit(String),
    #[error("backend has no submission to cancel")]
    NotSubmitted,
}

/// Raw status as reported by a backend. The scheduler is responsible for
/// turning `Finished` into `Success`/`Failed` via a [`jobsmith_core::SuccessPolicy`]
/// (spec invariant 4); the backend itself only distinguishes "still going"
/// from "done" from "I have no idea" (the at-least-once-restore case, §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    Running,
    Finished { success: bool },
    Cancelled,
    /// The backend lost track of this submission (e.g. restored from a
    /// snapshot against a scheduler that no longer recognizes the id).
    Unknown,
}

/// Uniform capability every execution backend must provide (spec §6).
///
/// `sync` from the original design — "inherit defaults from the handler's
/// default backend" — is modeled here as a plain config struct
/// ([`BackendDefaults`]) applied at construction time rather than a trait
/// method on `dyn Backend`, since the latter isn't object-safe for a
/// parent-typed argument. See DESIGN.md.
#[async_trait]
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;
    fn log_path(&self) -> &Path;

    /// Materialize the runnable artifact for this job under `folder`.
    async fn write_script(&mut self, folder: &Path) -> Result<(), BackendError>;

    /// Dispatch the job. Idempotent: calling submit twice without an
    /// intervening cancel/finish is a caller bug, not a backend concern.
    async fn submit(&mut self) -> Result<(), BackendError>;

    /// Revoke a submitted job. A no-op (not an error) if already finished.
    async fn cancel(&mut self) -> Result<(), BackendError>;

    /// Poll current status. Must be safe to call repeatedly and must not
    /// block the scheduler's single-threaded tick for long.
    async fn get_status(&mut self) -> Result<BackendStatus, BackendError>;
}

/// Defaults inherited by a job's backend from the handler's configuration,
/// mirroring the original's `backend.sync(parent_backend)`.
#[derive(Debug, Clone)]
pub struct BackendDefaults {
    pub script_folder: PathBuf,
    pub log_folder: PathBuf,
}
