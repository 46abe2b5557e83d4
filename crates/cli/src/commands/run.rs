// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::Args;
use jobsmith_core::Status;
use std::collections::HashSet;

use crate::common::CommonArgs;
use crate::output::print_run_summary;

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// HCL job-set definition (spec §6a: jobs, tags, parent_tags, backend, retries).
    pub jobset: PathBuf,

    /// Name-generation theme for jobs left unnamed in the job-set; falls
    /// back to the `theme` key in `--config` when omitted.
    #[arg(long)]
    pub theme: Option<String>,
}

pub async fn run(args: RunArgs) -> anyhow::Result<i32> {
    let contents = std::fs::read_to_string(&args.jobset)
        .map_err(|e| anyhow::anyhow!("reading job-set {}: {e}", args.jobset.display()))?;
    let theme = match args.theme.as_deref() {
        Some("nautical") => jobsmith_jobset::Theme::Nautical,
        Some(_) => jobsmith_jobset::Theme::Lovecraft,
        None => args.common.load_config()?.theme(),
    };
    let specs = jobsmith_jobset::parse_job_set(&contents, theme)?;
    if specs.is_empty() {
        anyhow::bail!("job-set {} declares no jobs", args.jobset.display());
    }

    let mut handler = args.common.build_handler(false)?;
    for spec in specs {
        handler.add_job(spec)?;
    }

    let summary = handler.run_jobs().await?;
    let failed: Vec<String> =
        handler.store().list(&HashSet::new(), &HashSet::from([Status::Failed])).into_iter().map(|j| j.name().to_string()).collect();
    print_run_summary(&summary, &failed, args.common.verbose);

    Ok(if summary.failed > 0 { 1 } else { 0 })
}
