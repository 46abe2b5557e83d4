// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashSet;

use clap::Args;
use jobsmith_core::Status;

use crate::common::{parse_tag_filter, CommonArgs};
use crate::output::print_status_table;

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Restrict to jobs carrying any of these tags (union match, spec §4.1).
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Restrict to jobs in any of these statuses.
    #[arg(long, value_delimiter = ',')]
    pub states: Vec<String>,
}

pub fn run(args: StatusArgs) -> anyhow::Result<i32> {
    let handler = args.common.build_handler(true)?;

    let tags = parse_tag_filter(&args.tags);
    let states = parse_states(&args.states)?;
    let jobs = handler.store().list(&tags, &states);
    print_status_table(&jobs);
    Ok(0)
}

fn parse_states(raw: &[String]) -> anyhow::Result<HashSet<Status>> {
    raw.iter()
        .map(|s| match s.as_str() {
            "configured" => Ok(Status::Configured),
            "running" => Ok(Status::Running),
            "success" => Ok(Status::Success),
            "failed" => Ok(Status::Failed),
            "cancelled" => Ok(Status::Cancelled),
            other => anyhow::bail!("unknown status {other:?}"),
        })
        .collect()
}
