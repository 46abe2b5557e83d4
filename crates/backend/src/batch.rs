// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch backend: stands in for a real HTC/Slurm-style remote scheduler.
//!
//! The defining behavioral difference from [`crate::local::LocalBackend`] is
//! that a batch backend never holds a direct child-process handle itself —
//! it only holds a submission id and must *ask* an external system for
//! status, on that system's own schedule. [`BatchQueue`] plays the role of
//! that external system: a process spawned on submit outlives the
//! `BatchBackend` value and is tracked by id in the shared queue, just as a
//! real scheduler's jobs outlive the CLI invocation that submitted them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use parking_lot::Mutex;
use tokio::process::{Child, Command};
use tracing::debug;
use uuid::Uuid;

use crate::{Backend, BackendDefaults, BackendError, BackendStatus};

enum QueueEntry {
    Running(Child),
    Finished { success: bool },
    Cancelled,
}

/// Shared simulated remote scheduler. Clone freely — all clones see the
/// same queue (`Arc` inside).
#[derive(Clone, Default)]
pub struct BatchQueue {
    entries: Arc<Mutex<HashMap<Uuid, QueueEntry>>>,
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, id: Uuid, child: Child) {
        self.entries.lock().insert(id, QueueEntry::Running(child));
    }

    /// Poll: reaps the child non-blockingly and updates queue state in place.
    fn poll(&self, id: Uuid) -> BackendStatus {
        let mut entries = self.entries.lock();
        let Some(entry) = entries.get_mut(&id) else {
            return BackendStatus::Unknown;
        };
        match entry {
            QueueEntry::Finished { success } => BackendStatus::Finished { success: *success },
            QueueEntry::Cancelled => BackendStatus::Cancelled,
            QueueEntry::Running(child) => match child.try_wait() {
                Ok(None) => BackendStatus::Running,
                Ok(Some(exit)) => {
                    let success = exit.success();
                    *entry = QueueEntry::Finished { success };
                    BackendStatus::Finished { success }
                }
                Err(_) => BackendStatus::Running,
            },
        }
    }

    fn cancel(&self, id: Uuid) {
        let mut entries = self.entries.lock();
        if let Some(QueueEntry::Running(child)) = entries.get(&id) {
            if let Some(pid) = child.id() {
                let _ = kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
            }
        }
        entries.insert(id, QueueEntry::Cancelled);
    }
}

pub struct BatchBackend {
    name: String,
    run_script: String,
    run_args: Vec<String>,
    script_path: PathBuf,
    log_path: PathBuf,
    queue: BatchQueue,
    submission_id: Option<Uuid>,
}

impl BatchBackend {
    pub fn new(
        name: impl Into<String>,
        run_script: impl Into<String>,
        run_args: Vec<String>,
        queue: BatchQueue,
    ) -> Self {
        Self {
            name: name.into(),
            run_script: run_script.into(),
            run_args,
            script_path: PathBuf::new(),
            log_path: PathBuf::new(),
            queue,
            submission_id: None,
        }
    }

    pub fn sync(&mut self, defaults: &BackendDefaults) {
        self.script_path = defaults.script_folder.join(format!("{}.sh", self.name));
        self.log_path = defaults.log_folder.join(format!("{}.log", self.name));
    }
}

#[async_trait]
impl Backend for BatchBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn log_path(&self) -> &Path {
        &self.log_path
    }

    async fn write_script(&mut self, folder: &Path) -> Result<(), BackendError> {
        tokio::fs::create_dir_all(folder).await?;
        self.script_path = folder.join(format!("{}.sh", self.name));
        let mut contents = String::from("#!/bin/sh\nset -e\n");
        contents.push_str(&self.run_script);
        contents.push('\n');
        tokio::fs::write(&self.script_path, contents).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = tokio::fs::metadata(&self.script_path).await?.permissions();
            perms.set_mode(0o755);
            tokio::fs::set_permissions(&self.script_path, perms).await?;
        }
        Ok(())
    }

    async fn submit(&mut self) -> Result<(), BackendError> {
        if let Some(parent) = self.log_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let log_file = std::fs::File::create(&self.log_path)?;
        let log_file_err = log_file.try_clone()?;

        let mut command = Command::new(&self.script_path);
        command.args(&self.run_args);
        command.stdout(Stdio::from(log_file));
        command.stderr(Stdio::from(log_file_err));

        let child = command.spawn().map_err(|e| BackendError::Submit(e.to_string()))?;
        let id = Uuid::new_v4();
        debug!(job = %self.name, submission = %id, "batch job submitted");
        self.queue.insert(id, child);
        self.submission_id = Some(id);
        Ok(())
    }

    async fn cancel(&mut self) -> Result<(), BackendError> {
        let Some(id) = self.submission_id else {
            return Ok(());
        };
        self.queue.cancel(id);
        Ok(())
    }

    async fn get_status(&mut self) -> Result<BackendStatus, BackendError> {
        let Some(id) = self.submission_id else {
            return Ok(BackendStatus::Unknown);
        };
        Ok(self.queue.poll(id))
    }
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
