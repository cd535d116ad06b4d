//! Quote command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Quote text (at most 200 characters)
    pub quote: String,
}

pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;

    let message = client
        .profile()
        .update_quote(&args.quote)
        .await
        .context("Failed to update quote")?;

    output::confirmation(message, "Quote updated");
    Ok(())
}
