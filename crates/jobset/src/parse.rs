// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parses a declarative job-set definition file (HCL) into [`JobSpec`]s.
//!
//! ```hcl
//! job "fetch" {
//!   run = "curl -o data.json https://example.test/data"
//!   tags = ["fetch"]
//! }
//!
//! job "process" {
//!   run          = "process data.json"
//!   parent_tags  = ["fetch"]
//!   max_retries  = 2
//!   backend      = "batch"
//! }
//! ```

use std::collections::HashMap;

use jobsmith_core::{normalize_tags, JobSpec, JobKind};
use serde::Deserialize;

use crate::error::JobSetError;
use crate::theme::{NameGenerator, Theme};

#[derive(Debug, Deserialize)]
struct RawJobSet {
    #[serde(default)]
    job: HashMap<String, RawJob>,
}

#[derive(Debug, Deserialize)]
struct RawJob {
    run: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    parent_tags: Vec<String>,
    #[serde(default)]
    backend: Option<String>,
    #[serde(default)]
    max_retries: u32,
    #[serde(default)]
    output: Option<String>,
}

/// Parse `content` into job specs, assigning each a name from `theme` when
/// the job-set's HCL label is itself a placeholder (an empty string, used by
/// callers that want every name auto-generated).
pub fn parse_job_set(content: &str, theme: Theme) -> Result<Vec<JobSpec>, JobSetError> {
    let raw: RawJobSet = hcl::from_str(content)?;
    let name_gen = NameGenerator::new(theme);

    let mut specs = Vec::with_capacity(raw.job.len());
    for (label, job) in raw.job {
        let name = name_gen.generate(if label.is_empty() { None } else { Some(label.as_str()) });
        let mut spec = JobSpec::new(&name, job.run);
        spec.run_args = job.args;
        spec.tags = normalize_tags(job.tags);
        spec.parent_tags = normalize_tags(job.parent_tags);
        spec.max_retries = job.max_retries;
        spec.output = job.output.map(Into::into);
        spec.kind_pref = match job.backend.as_deref() {
            None => None,
            Some("local") => Some(JobKind::Local),
            Some("batch") => Some(JobKind::Batch),
            Some(other) => return Err(JobSetError::InvalidBackend(name, other.to_string())),
        };
        specs.push(spec);
    }
    Ok(specs)
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
