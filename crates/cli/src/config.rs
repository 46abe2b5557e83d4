// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler-level defaults (spec §6 "configuration surface"), loaded from a
//! small TOML file the way `oj`'s process-wide config is loaded, with every
//! field overridable from the command line.

use std::path::{Path, PathBuf};
use std::time::Duration;

use jobsmith_jobset::Theme;
use serde::Deserialize;

/// On-disk handler defaults. Every field is optional so a config file may
/// set only what it cares about; the rest fall back to built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HandlerConfigFile {
    pub name: Option<String>,
    pub work_dir: Option<PathBuf>,
    pub local_max: Option<usize>,
    pub run_max: Option<usize>,
    pub max_retries: Option<u32>,
    pub is_verbose: Option<bool>,
    pub use_snapshot: Option<bool>,
    pub theme: Option<String>,
    pub tick_interval_secs: Option<u64>,
}

impl HandlerConfigFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {e}", path.display()))?;
        toml::from_str(&contents).map_err(|e| anyhow::anyhow!("parsing config {}: {e}", path.display()))
    }

    pub fn theme(&self) -> Theme {
        match self.theme.as_deref() {
            Some("nautical") => Theme::Nautical,
            _ => Theme::Lovecraft,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs.unwrap_or(5))
    }
}
