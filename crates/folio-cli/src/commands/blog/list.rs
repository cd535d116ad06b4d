//! List posts command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use folio_core::blog::{BlogStatus, PublishedQuery};

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only posts in this state (draft, scheduled, published, archived)
    #[arg(long, conflicts_with = "published")]
    pub status: Option<BlogStatus>,

    /// List the published reading feed instead of all posts
    #[arg(long)]
    pub published: bool,

    /// Feed page (with --published)
    #[arg(long, requires = "published")]
    pub page: Option<u32>,

    /// Feed page size (with --published)
    #[arg(long, requires = "published")]
    pub limit: Option<u32>,

    /// Feed topic filter (with --published)
    #[arg(long, requires = "published")]
    pub topic: Option<String>,

    /// Feed search text (with --published)
    #[arg(long, requires = "published")]
    pub search: Option<String>,

    /// Print one JSON object per post
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;
    let blogs = client.blogs();

    let posts = if args.published {
        let query = PublishedQuery {
            page: args.page,
            limit: args.limit,
            topic: args.topic,
            search: args.search,
        };
        blogs.list_published(&query).await
    } else if let Some(status) = args.status {
        blogs.list_by_status(status).await
    } else {
        blogs.list().await
    }
    .context("Failed to list posts")?;

    if posts.is_empty() {
        output::progress("No posts found.");
        return Ok(());
    }

    for post in &posts {
        if args.json {
            output::json(post)?;
        } else {
            output::blog_row(post);
        }
    }

    Ok(())
}
