//! Per-post analytics command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct AnalyticsArgs {
    /// Post id
    pub id: String,
}

pub async fn run(args: AnalyticsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;

    let analytics = client
        .analytics()
        .for_blog(&args.id)
        .await
        .context("Failed to fetch analytics")?;

    output::json_pretty(&analytics)
}
