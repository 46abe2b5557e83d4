// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Holds all jobs keyed by unique name, plus derived status/tag indexes
//! (spec §4.1).

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use jobsmith_core::{is_reserved, CoreError, Status};

use crate::error::SchedulerError;
use crate::job::Job;

#[derive(Default)]
pub struct JobStore {
    jobs: IndexMap<String, Job>,
    status_index: HashMap<Status, HashSet<String>>,
    tag_index: HashMap<String, Vec<String>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a job. Fails with `DuplicateName`/`ReservedName` (spec §4.1);
    /// this is the only reason an otherwise-valid job is rejected.
    pub fn add(&mut self, job: Job) -> Result<(), SchedulerError> {
        let name = job.name().to_string();
        if is_reserved(&name) {
            return Err(CoreError::ReservedName(name).into());
        }
        if self.jobs.contains_key(&name) {
            return Err(CoreError::DuplicateName(name).into());
        }
        for tag in &job.spec.tags {
            self.tag_index.entry(tag.clone()).or_default().push(name.clone());
        }
        self.status_index.entry(job.status()).or_default().insert(name.clone());
        self.jobs.insert(name, job);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Job> {
        self.jobs.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Job> {
        self.jobs.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Names in insertion order — the stable iteration order spec §4.4/§5 requires.
    pub fn names_in_order(&self) -> impl Iterator<Item = &str> {
        self.jobs.keys().map(String::as_str)
    }

    pub fn tagged(&self, tag: &str) -> &[String] {
        self.tag_index.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn status_bucket(&self, status: Status) -> &HashSet<String> {
        static EMPTY: std::sync::OnceLock<HashSet<String>> = std::sync::OnceLock::new();
        self.status_index.get(&status).unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }

    /// Jobs matching both filters: `tags` is a union match (any tag), empty
    /// means "all"; `states` is a set match, empty means "all".
    pub fn list(&self, tags: &HashSet<String>, states: &HashSet<Status>) -> Vec<&Job> {
        self.jobs
            .values()
            .filter(|j| j.spec.has_any_tag(tags))
            .filter(|j| states.is_empty() || states.contains(&j.status()))
            .collect()
    }

    /// Move `name` from `old` to `new` in the status index. Idempotent.
    pub fn reindex(&mut self, name: &str, old: Status, new: Status) {
        if old == new {
            return;
        }
        if let Some(bucket) = self.status_index.get_mut(&old) {
            bucket.remove(name);
        }
        self.status_index.entry(new).or_default().insert(name.to_string());
    }

    /// Refresh every job's status from its backend and reindex it (spec
    /// §4.4 step 1). Two passes: the jobs map owns the live status, the
    /// index is derived, so changes are collected then applied.
    pub async fn reconcile_all(&mut self) -> Result<(), SchedulerError> {
        let mut changes = Vec::new();
        for (name, job) in self.jobs.iter_mut() {
            let old = job.status();
            let new = job.get_status(false, false).await?;
            if old != new {
                changes.push((name.clone(), old, new));
            }
        }
        for (name, old, new) in changes {
            self.reindex(&name, old, new);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

#[cfg(all(test, feature = "test-support"))]
#[path = "store_proptests.rs"]
mod proptests;
