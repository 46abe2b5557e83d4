// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identity and the serializable part of a job's configuration.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::status::JobKind;
use crate::success::SuccessPolicy;

crate::define_id! {
    /// Short correlation id attached to a job for log correlation.
    ///
    /// The job's name (not this id) is the store key; this exists purely so
    /// that two jobs sharing a name across handler restarts (unlikely, but
    /// not impossible with `--use-snapshot` against a stale snapshot) can
    /// still be told apart in logs.
    pub struct JobId("job-");
}

/// The serializable configuration of a job: everything the snapshotter
/// needs to reconstruct it, minus the live backend handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    pub id: JobId,
    pub name: String,
    pub tags: HashSet<String>,
    pub parent_tags: HashSet<String>,
    /// `Some(kind)` pins the job to that execution kind; `None` lets the
    /// concurrency controller decide (spec §4.3).
    pub kind_pref: Option<JobKind>,
    pub max_retries: u32,
    pub retries_used: u32,
    pub output: Option<PathBuf>,
    pub success_policy: SuccessPolicy,
    pub run_script: String,
    pub run_args: Vec<String>,
}

impl JobSpec {
    pub fn new(name: impl Into<String>, run_script: impl Into<String>) -> Self {
        Self {
            id: JobId::new(),
            name: name.into(),
            tags: HashSet::new(),
            parent_tags: HashSet::new(),
            kind_pref: None,
            max_retries: 0,
            retries_used: 0,
            output: None,
            success_policy: SuccessPolicy::default(),
            run_script: run_script.into(),
            run_args: Vec::new(),
        }
    }

    /// Whether a retry credit remains. Mirrors the original's `do_retry()`.
    pub fn do_retry(&self) -> bool {
        self.retries_used < self.max_retries
    }

    /// Consume one retry credit. Caller must have checked `do_retry()` first;
    /// debug-asserts the invariant `retries_used <= max_retries` (spec invariant 3).
    pub fn consume_retry(&mut self) {
        debug_assert!(self.do_retry(), "consume_retry called with no retries remaining");
        self.retries_used += 1;
    }

    pub fn has_any_tag(&self, tags: &HashSet<String>) -> bool {
        tags.is_empty() || self.tags.iter().any(|t| tags.contains(t))
    }
}

/// Normalize a duck-typed tag/state parameter (spec §9) into a set of owned
/// strings at the Rust API boundary.
pub fn normalize_tags<I, S>(tags: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tags.into_iter().map(Into::into).collect()
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
