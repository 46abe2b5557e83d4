// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Core(#[from] jobsmith_core::CoreError),
    #[error(transparent)]
    Backend(#[from] jobsmith_backend::BackendError),
    #[error(transparent)]
    Storage(#[from] jobsmith_storage::StorageError),
}
