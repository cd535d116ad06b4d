//! Social links command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use folio_core::profile::SocialLinks;

use super::split_pair;
use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct SocialArgs {
    /// Link as PLATFORM=URL; repeat for each platform
    #[arg(long = "link", value_parser = split_pair, required = true)]
    pub links: Vec<(String, String)>,
}

pub async fn run(args: SocialArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;
    let links: SocialLinks = args.links.into_iter().collect();

    let message = client
        .profile()
        .set_social_media(&links)
        .await
        .context("Failed to update social links")?;

    output::confirmation(message, "Social links updated");
    Ok(())
}
