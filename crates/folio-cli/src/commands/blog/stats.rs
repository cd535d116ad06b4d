//! Dashboard statistics command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Print the raw statistics as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: StatsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;

    let stats = client
        .analytics()
        .dashboard()
        .await
        .context("Failed to fetch statistics")?;

    if args.json {
        return output::json_pretty(&stats);
    }

    let overview = &stats.overview;
    for (label, value) in [
        ("Posts", overview.total_blogs),
        ("Published", overview.published_blogs),
        ("Drafts", overview.draft_blogs),
        ("Scheduled", overview.scheduled_blogs),
        ("Views", overview.total_views),
        ("Likes", overview.total_likes),
        ("Comments", overview.total_comments),
    ] {
        output::field(label, &value.to_string());
    }

    if !stats.trending.is_empty() {
        println!();
        println!("Trending:");
        for post in &stats.trending {
            output::blog_row(post);
        }
    }

    Ok(())
}
