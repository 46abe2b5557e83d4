// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler + per-job snapshot persistence (spec §4.6).
//!
//! Snapshots are flat JSON blobs, not a WAL-backed store (explicit
//! Non-goal). Writes are atomic: write to a temp file in the same
//! directory, then rename, so a crash mid-write never corrupts the one
//! file every future restore depends on.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use jobsmith_core::JobSpec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StorageError;

/// The serializable part of a `JobHandlerConfig` (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HandlerSnapshot {
    pub name: String,
    pub base_folder: PathBuf,
    pub local_max: usize,
    pub run_max: Option<usize>,
    pub max_retries: u32,
    pub is_verbose: bool,
    pub local_counter: u64,
    /// Names of every job this handler knows about, in insertion order.
    pub job_names: Vec<String>,
    /// Status bucket name (e.g. "running") -> job names in that bucket.
    pub job_states: HashMap<String, Vec<String>>,
}

pub struct Snapshotter {
    snapshot_folder: PathBuf,
}

impl Snapshotter {
    pub fn new(base_folder: impl Into<PathBuf>) -> Self {
        Self { snapshot_folder: base_folder.into().join("snapshot") }
    }

    pub fn handler_path(&self) -> PathBuf {
        self.snapshot_folder.join("handler.json")
    }

    pub fn job_path(&self, name: &str) -> PathBuf {
        self.snapshot_folder.join(format!("{name}.json"))
    }

    pub fn write_handler(&self, snapshot: &HandlerSnapshot) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        write_atomic(&self.handler_path(), &bytes)
    }

    pub fn write_job(&self, spec: &JobSpec) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(spec)?;
        write_atomic(&self.job_path(&spec.name), &bytes)
    }

    /// Load the handler snapshot and every per-job config it references.
    ///
    /// A missing or corrupt handler snapshot is not fatal (spec §4.6): this
    /// logs a warning and returns `None`, signaling the caller to reset to
    /// a fresh working tree exactly as if `use_snapshot` had been false.
    /// A per-job file that is missing or corrupt is skipped the same way;
    /// the rest of the handler still restores.
    pub fn restore(&self) -> Option<(HandlerSnapshot, Vec<JobSpec>)> {
        let handler = match read_json::<HandlerSnapshot>(&self.handler_path()) {
            Ok(handler) => handler,
            Err(e) => {
                warn!(error = %e, path = %self.handler_path().display(), "no usable handler snapshot, resetting to a fresh working tree");
                return None;
            }
        };

        let mut jobs = Vec::with_capacity(handler.job_names.len());
        for name in &handler.job_names {
            match read_json::<JobSpec>(&self.job_path(name)) {
                Ok(spec) => jobs.push(spec),
                Err(e) => {
                    warn!(error = %e, job = %name, "dropping job with missing or corrupt snapshot");
                }
            }
        }
        Some((handler, jobs))
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, StorageError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let tmp_path = dir.join(format!(".{}.tmp", path.file_name().and_then(|n| n.to_str()).unwrap_or("snapshot")));
    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
