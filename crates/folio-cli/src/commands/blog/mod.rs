//! Blog subcommand implementations.

mod analytics;
mod create;
mod delete;
mod get;
mod list;
mod set_status;
mod stats;
mod upload_image;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::session::Context;

#[derive(Args, Debug)]
pub struct BlogCommand {
    #[command(subcommand)]
    pub command: BlogSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BlogSubcommand {
    /// List posts
    List(list::ListArgs),

    /// Fetch a single post
    Get(get::GetArgs),

    /// Create a post or draft
    Create(create::CreateArgs),

    /// Change a post's publication state
    SetStatus(set_status::SetStatusArgs),

    /// Delete a post
    Delete(delete::DeleteArgs),

    /// Show dashboard statistics
    Stats(stats::StatsArgs),

    /// Show analytics for one post
    Analytics(analytics::AnalyticsArgs),

    /// Upload an image and print its URL
    UploadImage(upload_image::UploadImageArgs),
}

pub async fn handle(cmd: BlogCommand, ctx: &Context) -> Result<()> {
    match cmd.command {
        BlogSubcommand::List(args) => list::run(args, ctx).await,
        BlogSubcommand::Get(args) => get::run(args, ctx).await,
        BlogSubcommand::Create(args) => create::run(args, ctx).await,
        BlogSubcommand::SetStatus(args) => set_status::run(args, ctx).await,
        BlogSubcommand::Delete(args) => delete::run(args, ctx).await,
        BlogSubcommand::Stats(args) => stats::run(args, ctx).await,
        BlogSubcommand::Analytics(args) => analytics::run(args, ctx).await,
        BlogSubcommand::UploadImage(args) => upload_image::run(args, ctx).await,
    }
}
