// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property-based checks for spec §8 invariants 1 and 7, gated behind
//! `jobsmith-core`'s `test-support` feature (§7a).

use proptest::prelude::*;

use super::*;
use jobsmith_core::JobSpec;

const STATES: [Status; 6] =
    [Status::Configured, Status::Running, Status::Finished, Status::Success, Status::Failed, Status::Cancelled];

fn status_strategy() -> impl Strategy<Value = Status> {
    (0..STATES.len()).prop_map(|i| STATES[i])
}

fn buckets(store: &JobStore, name: &str) -> Vec<Status> {
    STATES.iter().copied().filter(|s| store.status_bucket(*s).contains(name)).collect()
}

proptest! {
    /// Invariant 1: after any sequence of reindex calls, a job's name sits
    /// in exactly one status bucket.
    #[test]
    fn a_job_always_lands_in_exactly_one_status_bucket(transitions in prop::collection::vec(status_strategy(), 0..20)) {
        let mut store = JobStore::new();
        store.add(Job::new(JobSpec::new("solo", "true"))).unwrap();
        let mut current = Status::Configured;
        for next in transitions {
            store.reindex("solo", current, next);
            current = next;
        }

        prop_assert_eq!(buckets(&store, "solo"), vec![current]);
    }

    /// Invariant 7: reindexing to the same status a second time changes
    /// nothing — `reindex(j); reindex(j) ≡ reindex(j)`.
    #[test]
    fn reindex_to_the_same_status_twice_is_a_noop(from in status_strategy(), to in status_strategy()) {
        let mut store = JobStore::new();
        store.add(Job::new(JobSpec::new("solo", "true"))).unwrap();
        store.reindex("solo", Status::Configured, from);
        store.reindex("solo", from, to);
        let once = buckets(&store, "solo");

        store.reindex("solo", to, to);
        let twice = buckets(&store, "solo");

        prop_assert_eq!(once, twice);
    }
}
