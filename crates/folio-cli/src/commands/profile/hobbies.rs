//! Hobbies command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct HobbiesArgs {
    /// The complete list of hobbies
    #[arg(required = true)]
    pub hobbies: Vec<String>,
}

pub async fn run(args: HobbiesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;

    let message = client
        .profile()
        .set_hobbies(&args.hobbies)
        .await
        .context("Failed to update hobbies")?;

    output::confirmation(message, "Hobbies updated");
    Ok(())
}
