// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-stage graceful shutdown (spec §4.7): the first interrupt stops new
//! submissions and waits on in-flight local jobs to drain; a second
//! interrupt during the drain hard-cancels them. Grounded in the
//! `tokio::signal::ctrl_c()` + `tokio::pin!` pattern the teacher uses for
//! its own Ctrl-C handling (`cli/src/output.rs`'s `tail_file`/`poll_log_follow`).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPhase {
    Running,
    Draining,
    HardCancel,
}

pub struct SignalSupervisor {
    phase: ShutdownPhase,
}

impl Default for SignalSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalSupervisor {
    pub fn new() -> Self {
        Self { phase: ShutdownPhase::Running }
    }

    pub fn phase(&self) -> ShutdownPhase {
        self.phase
    }

    /// Waits for the next Ctrl-C and advances the phase, returning the phase
    /// *before* this interrupt was observed. Each call installs a fresh
    /// handler, since `tokio::signal::ctrl_c()` resolves once. Callers must
    /// act on the returned phase, not `self.phase()` read afterward — the
    /// latter has already moved on to the next stage.
    pub async fn wait_for_next_interrupt(&mut self) -> ShutdownPhase {
        let _ = tokio::signal::ctrl_c().await;
        let previous = self.phase;
        self.phase = match self.phase {
            ShutdownPhase::Running => ShutdownPhase::Draining,
            ShutdownPhase::Draining | ShutdownPhase::HardCancel => ShutdownPhase::HardCancel,
        };
        previous
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
