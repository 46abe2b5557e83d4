// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decides whether a job is ready to submit, based on the status of the
//! jobs carrying its parent tags (spec §4.2).

use std::collections::HashSet;

use tracing::warn;

use crate::store::JobStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady,
    /// A parent tag's only jobs are terminally failed with no retries left;
    /// the dependent must be cascade-cancelled with retries cleared.
    Unrecoverable,
}

pub fn check(store: &JobStore, parent_tags: &HashSet<String>) -> Readiness {
    if parent_tags.is_empty() {
        return Readiness::Ready;
    }

    let mut all_satisfied = true;
    let mut any_unrecoverable = false;

    for tag in parent_tags {
        let names = store.tagged(tag);
        if names.is_empty() {
            warn!(tag, "parent tag has no registered jobs, treating as not ready");
            all_satisfied = false;
            continue;
        }

        let parents = names.iter().filter_map(|name| store.get(name));
        if parents.clone().any(|p| p.status() == jobsmith_core::Status::Success) {
            continue;
        }

        all_satisfied = false;
        if parents.filter(|p| p.status().is_retryable()).any(|p| !p.do_retry()) {
            any_unrecoverable = true;
        }
    }

    if any_unrecoverable {
        Readiness::Unrecoverable
    } else if all_satisfied {
        Readiness::Ready
    } else {
        Readiness::NotReady
    }
}

#[cfg(test)]
#[path = "dependency_tests.rs"]
mod tests;
