// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test builders shared by downstream crates (gated behind `test-support`).

use std::collections::HashSet;
use std::path::PathBuf;

use crate::job::{JobId, JobSpec};
use crate::status::JobKind;
use crate::success::SuccessPolicy;

crate::builder! {
    pub struct JobSpecBuilder => JobSpec {
        into {
            name: String = "job",
            run_script: String = "true",
        }
        set {
            tags: HashSet<String> = HashSet::new(),
            parent_tags: HashSet<String> = HashSet::new(),
            max_retries: u32 = 0,
            retries_used: u32 = 0,
            run_args: Vec<String> = Vec::new(),
        }
        option {
            kind_pref: JobKind = None,
            output: PathBuf = None,
        }
        computed {
            id: JobId = JobId::new(),
            success_policy: SuccessPolicy = SuccessPolicy::default(),
        }
    }
}
