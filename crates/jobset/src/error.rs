// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobSetError {
    #[error("malformed job-set definition: {0}")]
    Hcl(#[from] hcl::Error),
    #[error("job \"{0}\" has an invalid backend preference {1:?} (expected \"local\" or \"batch\")")]
    InvalidBackend(String, String),
}
