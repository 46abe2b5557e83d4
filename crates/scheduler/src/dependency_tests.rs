// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::job::Job;
use jobsmith_core::{JobSpec, Status};

fn store_with(jobs: Vec<Job>) -> JobStore {
    let mut store = JobStore::new();
    for job in jobs {
        store.add(job).unwrap();
    }
    store
}

fn tagged(name: &str, tag: &str) -> Job {
    let mut spec = JobSpec::new(name, "true");
    spec.tags.insert(tag.to_string());
    Job::new(spec)
}

fn force_status(store: &mut JobStore, name: &str, status: Status) {
    let old = store.get(name).unwrap().status();
    store.get_mut(name).unwrap().set_status_for_test(status);
    store.reindex(name, old, status);
}

#[test]
fn no_parent_tags_is_ready() {
    let store = JobStore::new();
    assert_eq!(check(&store, &HashSet::new()), Readiness::Ready);
}

#[test]
fn unregistered_parent_tag_is_not_ready() {
    let store = JobStore::new();
    let parent_tags = HashSet::from(["missing".to_string()]);
    assert_eq!(check(&store, &parent_tags), Readiness::NotReady);
}

#[test]
fn pending_parent_is_not_ready() {
    let store = store_with(vec![tagged("a", "p")]);
    let parent_tags = HashSet::from(["p".to_string()]);
    assert_eq!(check(&store, &parent_tags), Readiness::NotReady);
}

#[test]
fn successful_parent_is_ready() {
    let mut store = store_with(vec![tagged("a", "p")]);
    force_status(&mut store, "a", Status::Success);
    let parent_tags = HashSet::from(["p".to_string()]);
    assert_eq!(check(&store, &parent_tags), Readiness::Ready);
}

#[test]
fn exhausted_parent_is_unrecoverable() {
    let mut store = store_with(vec![tagged("a", "p")]);
    force_status(&mut store, "a", Status::Failed);
    let parent_tags = HashSet::from(["p".to_string()]);
    assert_eq!(check(&store, &parent_tags), Readiness::Unrecoverable);
}

#[test]
fn failed_parent_with_retries_remaining_is_not_unrecoverable() {
    let mut store = store_with(vec![tagged("a", "p")]);
    store.get_mut("a").unwrap().spec.max_retries = 1;
    force_status(&mut store, "a", Status::Failed);
    let parent_tags = HashSet::from(["p".to_string()]);
    assert_eq!(check(&store, &parent_tags), Readiness::NotReady);
}

#[test]
fn one_successful_sibling_satisfies_the_tag_even_if_another_failed() {
    let mut store = store_with(vec![tagged("a", "p"), tagged("b", "p")]);
    force_status(&mut store, "a", Status::Success);
    force_status(&mut store, "b", Status::Failed);
    let parent_tags = HashSet::from(["p".to_string()]);
    assert_eq!(check(&store, &parent_tags), Readiness::Ready);
}

#[test]
fn two_parent_tags_both_must_be_satisfied() {
    let mut store = store_with(vec![tagged("a", "p"), tagged("b", "q")]);
    force_status(&mut store, "a", Status::Success);
    let parent_tags = HashSet::from(["p".to_string(), "q".to_string()]);
    assert_eq!(check(&store, &parent_tags), Readiness::NotReady);

    force_status(&mut store, "b", Status::Success);
    assert_eq!(check(&store, &parent_tags), Readiness::Ready);
}
