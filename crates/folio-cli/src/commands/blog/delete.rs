//! Delete post command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Post id
    pub id: String,
}

pub async fn run(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;

    let message = client
        .blogs()
        .delete(&args.id)
        .await
        .context("Failed to delete post")?;

    output::confirmation(message, "Post deleted");
    Ok(())
}
