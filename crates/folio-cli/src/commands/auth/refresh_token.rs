//! Refresh token command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(_args: RefreshTokenArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;

    output::progress("Refreshing session...");

    client
        .refresh()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");
    Ok(())
}
