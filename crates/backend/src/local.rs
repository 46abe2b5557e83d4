// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local backend: runs a job as a detached child process of the orchestrator.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::{Backend, BackendDefaults, BackendError, BackendStatus};

/// Runs `run_script` as a child process in its own process group, so that a
/// Ctrl-C delivered to the orchestrator's controlling terminal does not also
/// reach the child (spec §4.7 / §6a). Cancellation is always explicit, via
/// [`LocalBackend::cancel`].
pub struct LocalBackend {
    name: String,
    run_script: String,
    run_args: Vec<String>,
    script_path: PathBuf,
    log_path: PathBuf,
    child: Option<Child>,
}

impl LocalBackend {
    pub fn new(name: impl Into<String>, run_script: impl Into<String>, run_args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            run_script: run_script.into(),
            run_args,
            script_path: PathBuf::new(),
            log_path: PathBuf::new(),
            child: None,
        }
    }

    pub fn sync(&mut self, defaults: &BackendDefaults) {
        self.script_path = defaults.script_folder.join(format!("{}.sh", self.name));
        self.log_path = defaults.log_folder.join(format!("{}.log", self.name));
    }
}

#[async_trait]
impl Backend for LocalBackend {
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
        // New process group rooted at the child's own pid, so the
        // orchestrator's controlling-terminal signals don't propagate to it.
        command.process_group(0);

        let child = command.spawn().map_err(|e| BackendError::Submit(e.to_string()))?;
        debug!(job = %self.name, pid = ?child.id(), "local job submitted");
        self.child = Some(child);
        Ok(())
    }

    async fn cancel(&mut self) -> Result<(), BackendError> {
        let Some(child) = self.child.as_ref() else {
            return Ok(());
        };
        let Some(pid) = child.id() else {
            return Ok(());
        };
        // Negative pid targets the whole process group (see `process_group(0)` above).
        if let Err(e) = kill(Pid::from_raw(-(pid as i32)), Signal::SIGTERM) {
            warn!(job = %self.name, error = %e, "failed to signal local job's process group");
        }
        Ok(())
    }

    async fn get_status(&mut self) -> Result<BackendStatus, BackendError> {
        let Some(child) = self.child.as_mut() else {
            return Ok(BackendStatus::Unknown);
        };
        match child.try_wait() {
            Ok(None) => Ok(BackendStatus::Running),
            Ok(Some(exit_status)) => Ok(BackendStatus::Finished { success: exit_status.success() }),
            Err(e) => Err(BackendError::Submit(e.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
