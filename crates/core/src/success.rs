// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Success-evaluation policy.
//!
//! The original success predicate is user-supplied and explicitly out of
//! scope for the core (spec §1). `SuccessPolicy` is the serializable stand-in
//! that ships with this crate: it is consulted only once the backend reports
//! `Finished`, exactly where a user predicate would be.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::status::Status;

/// How a `Finished` backend report is turned into `Success` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SuccessPolicy {
    /// Trust the backend's own success/fail signal.
    #[default]
    BackendReported,
    /// Succeed iff the job's declared output path exists on disk.
    OutputExists,
}

impl SuccessPolicy {
    /// Evaluate a `Finished` report. `backend_success` is the backend's own
    /// verdict (used directly, or as a fallback when `OutputExists` has no
    /// output path to check).
    pub fn evaluate(&self, backend_success: bool, output: Option<&Path>) -> Status {
        let success = match self {
            SuccessPolicy::BackendReported => backend_success,
            SuccessPolicy::OutputExists => match output {
                Some(path) => path.exists(),
                None => backend_success,
            },
        };
        if success {
            Status::Success
        } else {
            Status::Failed
        }
    }
}

#[cfg(test)]
#[path = "success_tests.rs"]
mod tests;
