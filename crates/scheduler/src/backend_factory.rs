// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the concrete backend a job's resolved [`JobKind`] calls for.
//!
//! Backend choice happens lazily at first submission, not at job creation
//! (mirrors the original, where `set_local()` is called just before
//! `submit()` inside the scheduling loop, not at job construction).

use jobsmith_backend::batch::BatchQueue;
use jobsmith_backend::local::LocalBackend;
use jobsmith_backend::{Backend, BackendDefaults};
use jobsmith_core::{JobKind, JobSpec};

pub struct BackendFactory {
    defaults: BackendDefaults,
    batch_queue: BatchQueue,
}

impl BackendFactory {
    pub fn new(defaults: BackendDefaults) -> Self {
        Self { defaults, batch_queue: BatchQueue::new() }
    }

    pub fn build(&self, kind: JobKind, spec: &JobSpec) -> Box<dyn Backend> {
        match kind {
            JobKind::Local => {
                let mut backend = LocalBackend::new(spec.name.clone(), spec.run_script.clone(), spec.run_args.clone());
                backend.sync(&self.defaults);
                Box::new(backend)
            }
            JobKind::Batch => {
                let mut backend = jobsmith_backend::batch::BatchBackend::new(
                    spec.name.clone(),
                    spec.run_script.clone(),
                    spec.run_args.clone(),
                    self.batch_queue.clone(),
                );
                backend.sync(&self.defaults);
                Box::new(backend)
            }
        }
    }
}
