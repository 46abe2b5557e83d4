// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashSet;
use std::time::Duration;

use jobsmith_core::{JobSpec, Status};
use tempfile::tempdir;

use super::*;

fn config(base_folder: std::path::PathBuf) -> JobHandlerConfig {
    JobHandlerConfig {
        name: "test-handler".to_string(),
        base_folder,
        local_max: 2,
        run_max: None,
        max_retries: 0,
        is_verbose: false,
        use_snapshot: true,
        tick_interval: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn run_jobs_drives_every_job_to_a_terminal_status_and_writes_a_final_snapshot() {
    let dir = tempdir().unwrap();
    let mut handler = JobHandler::new(config(dir.path().join("work")));
    handler.add_job(JobSpec::new("solo", "true")).unwrap();

    let summary = handler.run_jobs().await.unwrap();

    assert_eq!(summary.succeeded, 1);
    assert!(dir.path().join("work/snapshot/handler.json").exists());
}

#[tokio::test]
async fn a_fresh_handler_with_use_snapshot_and_no_prior_run_starts_empty() {
    let dir = tempdir().unwrap();
    let handler = JobHandler::new(config(dir.path().join("work")));
    assert_eq!(handler.store().len(), 0);
}

#[tokio::test]
async fn restoring_rehydrates_jobs_with_their_persisted_status() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("work");

    let mut handler = JobHandler::new(config(base.clone()));
    handler.add_job(JobSpec::new("solo", "true")).unwrap();
    handler.run_jobs().await.unwrap();
    assert_eq!(handler.store().get("solo").unwrap().status(), Status::Success);

    let mut restored = JobHandler::new(config(base));
    assert_eq!(restored.store().get("solo").unwrap().status(), Status::Success);

    // A restored handler that's already complete has nothing left to do.
    let summary = restored.run_jobs().await.unwrap();
    assert_eq!(summary.succeeded, 1);
}

#[tokio::test]
async fn add_job_is_rejected_while_a_restore_is_in_progress() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("work");
    let mut handler = JobHandler::new(config(base));
    handler.restoring = true;
    let err = handler.add_job(JobSpec::new("late", "true")).unwrap_err();
    assert!(matches!(err, SchedulerError::Core(jobsmith_core::CoreError::RestoreInProgress)));
}

#[tokio::test]
async fn cancel_jobs_through_the_handler_persists_a_snapshot() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("work");
    let mut handler = JobHandler::new(config(base.clone()));
    let mut spec = JobSpec::new("longrunner", "sleep 5");
    spec.tags.insert("batch-a".to_string());
    handler.add_job(spec).unwrap();

    handler.submit_jobs(false, &HashSet::new(), false).await.unwrap();
    assert_eq!(handler.store().get("longrunner").unwrap().status(), Status::Running);

    handler.cancel_jobs(&HashSet::from(["batch-a".to_string()]), false, false, true).await.unwrap();
    assert_eq!(handler.store().get("longrunner").unwrap().status(), Status::Cancelled);
    assert!(base.join("snapshot/handler.json").exists());
}
