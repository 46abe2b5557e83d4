// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Args;

use crate::common::{parse_tag_filter, CommonArgs};

#[derive(Debug, Args)]
pub struct RetryArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only retry jobs carrying any of these tags; omit to match all.
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

pub fn run(args: RetryArgs) -> anyhow::Result<i32> {
    let mut handler = args.common.build_handler(true)?;
    let tags = parse_tag_filter(&args.tags);
    handler.retry_jobs(&tags, true)?;
    println!("retried failed/cancelled jobs matching the given filters (where retry budget remains)");
    Ok(0)
}
