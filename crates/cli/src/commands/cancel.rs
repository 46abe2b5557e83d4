// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Args;

use crate::common::{parse_tag_filter, CommonArgs};

#[derive(Debug, Args)]
pub struct CancelArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only cancel jobs carrying any of these tags; omit to match all.
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Only cancel local jobs. Mutually exclusive with `--only-batch`
    /// (spec §4.5: if both are set, no job matches).
    #[arg(long)]
    pub only_local: bool,

    #[arg(long)]
    pub only_batch: bool,
}

pub async fn run(args: CancelArgs) -> anyhow::Result<i32> {
    let mut handler = args.common.build_handler(true)?;
    let tags = parse_tag_filter(&args.tags);
    handler.cancel_jobs(&tags, args.only_local, args.only_batch, true).await?;
    println!("cancelled running jobs matching the given filters");
    Ok(0)
}
