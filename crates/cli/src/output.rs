// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal formatting shared across subcommands: the job status table and
//! the final `run` summary (spec §7 "user-visible behavior").

use jobsmith_scheduler::{Job, RunSummary};

pub fn print_status_table(jobs: &[&Job]) {
    if jobs.is_empty() {
        println!("no jobs match the given filters");
        return;
    }
    println!("{:<28} {:<10} {:<8} {:<6} tags", "NAME", "STATUS", "KIND", "RETRY");
    for job in jobs {
        let retries = format!("{}/{}", job.spec.retries_used, job.spec.max_retries);
        let kind = if job.is_local() { "local" } else { "batch" };
        let tags: Vec<&str> = job.spec.tags.iter().map(String::as_str).collect();
        println!("{:<28} {:<10} {:<8} {:<6} {}", job.name(), job.status(), kind, retries, tags.join(","));
    }
}

pub fn print_run_summary(summary: &RunSummary, failed_names: &[String], verbose: bool) {
    println!("jobs processed: {} (local {}, batch {})", summary.local + summary.batch, summary.local, summary.batch);
    println!("succeeded: {}  failed: {}  cancelled: {}", summary.succeeded, summary.failed, summary.cancelled);
    println!("elapsed: {:.1}s", summary.elapsed.as_secs_f64());
    if verbose && !failed_names.is_empty() {
        println!("failed jobs: {}", failed_names.join(", "));
    }
}
