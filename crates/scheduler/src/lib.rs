// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobsmith-scheduler: the dependency-gated, dual-pool job scheduler (spec
//! §4). Ties together [`jobsmith_core`]'s types, [`jobsmith_backend`]'s
//! execution backends, and [`jobsmith_storage`]'s snapshotting into the
//! tick loop, the job handler façade, and graceful shutdown.

mod backend_factory;
mod concurrency;
mod dependency;
mod error;
mod handler;
mod job;
mod scheduler;
mod signal;
mod store;

pub use backend_factory::BackendFactory;
pub use concurrency::ConcurrencyController;
pub use dependency::Readiness;
pub use error::SchedulerError;
pub use handler::{JobHandler, JobHandlerConfig};
pub use job::Job;
pub use scheduler::{RunSummary, Scheduler};
pub use signal::SignalSupervisor;
pub use store::JobStore;
