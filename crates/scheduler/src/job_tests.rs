// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jobsmith_backend::BackendDefaults;

fn factory(dir: &std::path::Path) -> BackendFactory {
    BackendFactory::new(BackendDefaults { script_folder: dir.join("scripts"), log_folder: dir.join("logs") })
}

async fn wait_terminal(job: &mut Job) -> Status {
    for _ in 0..200 {
        let status = job.get_status(false, false).await.unwrap();
        if status.is_terminal() {
            return status;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("job did not reach a terminal status in time");
}

#[tokio::test]
async fn fresh_job_is_configured() {
    let job = Job::new(JobSpec::new("a", "true"));
    assert_eq!(job.status(), Status::Configured);
    assert_eq!(job.kind(), JobKind::Batch);
}

#[tokio::test]
async fn set_local_pins_kind() {
    let mut job = Job::new(JobSpec::new("a", "true"));
    job.set_local();
    assert!(job.is_local());
}

#[tokio::test]
async fn submit_and_reconcile_a_successful_local_job() {
    let dir = tempfile::tempdir().unwrap();
    let mut job = Job::new(JobSpec::new("ok", "exit 0"));
    job.set_local();
    job.submit(&factory(dir.path()), &dir.path().join("scripts")).await.unwrap();
    assert_eq!(job.status(), Status::Running);

    assert_eq!(wait_terminal(&mut job).await, Status::Success);
}

#[tokio::test]
async fn submit_and_reconcile_a_failing_batch_job() {
    let dir = tempfile::tempdir().unwrap();
    let mut job = Job::new(JobSpec::new("bad", "exit 1"));
    job.submit(&factory(dir.path()), &dir.path().join("scripts")).await.unwrap();

    assert_eq!(wait_terminal(&mut job).await, Status::Failed);
}

#[tokio::test]
async fn skip_eval_never_touches_the_backend() {
    let job_spec = JobSpec::new("a", "true");
    let mut job = Job::new(job_spec);
    assert_eq!(job.get_status(true, false).await.unwrap(), Status::Configured);
}

#[tokio::test]
async fn retry_requires_budget_and_terminal_status() {
    let mut job = Job::new(JobSpec::new("a", "true"));
    assert!(!job.retry(), "Configured job has nothing to retry");

    job.spec.max_retries = 1;
    let mut job = job;
    job.cancel(false).await.unwrap();
    assert!(job.retry());
    assert_eq!(job.status(), Status::Configured);
    assert_eq!(job.spec.retries_used, 1);
    assert!(!job.retry(), "retry budget already spent");
}

#[tokio::test]
async fn cancel_with_clear_retry_exhausts_budget() {
    let mut job = Job::new(JobSpec::new("a", "true"));
    job.spec.max_retries = 3;
    job.cancel(true).await.unwrap();
    assert_eq!(job.spec.retries_used, job.spec.max_retries);
    assert!(!job.do_retry());
}
