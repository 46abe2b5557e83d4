// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Enforces `local_max` (live local jobs) and `run_max` (total running
//! jobs) (spec §4.3).

use jobsmith_core::{JobKind, Status};

use crate::job::Job;
use crate::store::JobStore;

pub struct ConcurrencyController {
    local_max: usize,
    run_max: Option<usize>,
    local_queue: Vec<String>,
    local_counter: u64,
}

impl ConcurrencyController {
    pub fn new(local_max: usize, run_max: Option<usize>) -> Self {
        Self { local_max, run_max, local_queue: Vec::new(), local_counter: 0 }
    }

    pub fn live_local(&self) -> usize {
        self.local_queue.len()
    }

    /// Monotone tally of every job ever assigned to local execution.
    pub fn local_counter(&self) -> u64 {
        self.local_counter
    }

    pub fn run_cap_reached(&self, live_running: usize) -> bool {
        self.run_max.is_some_and(|cap| live_running >= cap)
    }

    /// Drop any local-queue entry whose job is no longer Running.
    pub fn reap_local(&mut self, store: &JobStore) {
        self.local_queue.retain(|name| store.get(name).map(|j| j.status() == Status::Running).unwrap_or(false));
    }

    /// Resolve `job`'s execution kind for this submission. An unpinned job
    /// is promoted to local while there is local headroom; otherwise it
    /// falls through to batch. An explicit pin is never overridden.
    pub fn assign(&mut self, job: &mut Job) -> JobKind {
        if job.spec.kind_pref.is_none() && self.live_local() < self.local_max {
            job.set_local();
            self.local_queue.push(job.name().to_string());
            self.local_counter += 1;
        }
        job.kind()
    }
}

#[cfg(test)]
#[path = "concurrency_tests.rs"]
mod tests;
