//! Set post status command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use folio_core::blog::BlogStatus;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct SetStatusArgs {
    /// Post id
    pub id: String,

    /// New state (draft, scheduled, published, archived)
    pub status: BlogStatus,
}

pub async fn run(args: SetStatusArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;

    let post = client
        .blogs()
        .set_status(&args.id, args.status)
        .await
        .context("Failed to update status")?;

    output::success(&format!("'{}' is now {}", post.title, post.status));
    Ok(())
}
