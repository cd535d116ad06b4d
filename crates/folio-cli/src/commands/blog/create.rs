//! Create post command implementation.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use clap::Args;

use folio_core::blog::{BlogDraft, BlogStatus};

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: Option<String>,

    /// Post body (HTML)
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the post body from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    #[arg(long)]
    pub topic: Option<String>,

    /// Comma-separated tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Initial state (draft, scheduled, published)
    #[arg(long)]
    pub status: Option<BlogStatus>,

    /// Publication time for scheduled posts (RFC 3339)
    #[arg(long)]
    pub scheduled_for: Option<DateTime<Utc>>,

    /// Save as a draft; no fields are required
    #[arg(long)]
    pub draft: bool,
}

pub async fn run(args: CreateArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;

    let content = match &args.content_file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => args.content,
    };

    let draft = BlogDraft {
        title: args.title,
        content,
        topic: args.topic,
        tags: (!args.tags.is_empty()).then_some(args.tags),
        status: args.status,
        scheduled_for: args.scheduled_for,
        ..Default::default()
    };

    let post = if args.draft {
        client.blogs().create_draft(&draft).await
    } else {
        client.blogs().create(&draft).await
    }
    .context("Failed to create post")?;

    output::success("Post created");
    output::field("ID", &post.id);
    output::field("Slug", &post.slug);
    output::field("Status", post.status.as_str());

    Ok(())
}
