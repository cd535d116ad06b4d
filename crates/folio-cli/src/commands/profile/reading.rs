//! Reading list command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use folio_core::profile::ReadingResource;

use super::split_pair;
use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct ReadingArgs {
    /// Resource as TITLE=URL; repeat for each entry
    #[arg(long = "resource", value_parser = split_pair, required = true)]
    pub resources: Vec<(String, String)>,
}

pub async fn run(args: ReadingArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;
    let resources: Vec<ReadingResource> = args
        .resources
        .into_iter()
        .map(|(title, url)| ReadingResource { title, url })
        .collect();

    let message = client
        .profile()
        .set_reading_resources(&resources)
        .await
        .context("Failed to update reading list")?;

    output::confirmation(message, "Reading list updated");
    Ok(())
}
