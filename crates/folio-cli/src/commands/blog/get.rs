//! Get post command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Post id, or slug with --slug
    pub id: String,

    /// Treat the argument as a slug
    #[arg(long)]
    pub slug: bool,
}

pub async fn run(args: GetArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;

    let post = if args.slug {
        client.blogs().get_by_slug(&args.id).await
    } else {
        client.blogs().get(&args.id).await
    }
    .context("Failed to fetch post")?;

    output::json_pretty(&post)
}
