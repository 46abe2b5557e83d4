// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Core error taxonomy (see spec §7).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("a job named {0:?} already exists")]
    DuplicateName(String),

    #[error("{0:?} is a reserved name and cannot be used for a job")]
    ReservedName(String),

    #[error("cannot add a job while a snapshot restore is in progress")]
    RestoreInProgress,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
