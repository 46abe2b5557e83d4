// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job status and execution-kind enums.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a job.
///
/// `Finished` is a transient pseudo-status: the scheduler always promotes it
/// to `Success` or `Failed` within the same tick it was observed, so it never
/// survives into the status index. It exists only as a return value from a
/// backend's raw status probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Configured,
    Running,
    Finished,
    Success,
    Failed,
    Cancelled,
}

impl Status {
    /// All non-transient statuses the store actually indexes jobs under.
    pub const INDEXED: [Status; 5] =
        [Status::Configured, Status::Running, Status::Success, Status::Failed, Status::Cancelled];

    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Success | Status::Failed | Status::Cancelled)
    }

    pub fn is_retryable(self) -> bool {
        matches!(self, Status::Failed | Status::Cancelled)
    }
}

crate::simple_display! {
    Status {
        Configured => "configured",
        Running => "running",
        Finished => "finished",
        Success => "success",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

/// Where a job executes: as a child process of the orchestrator, or
/// delegated to an external batch scheduling backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Local,
    Batch,
}

crate::simple_display! {
    JobKind {
        Local => "local",
        Batch => "batch",
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
