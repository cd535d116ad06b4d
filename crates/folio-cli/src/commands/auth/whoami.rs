//! Whoami command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the stored user record as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, ctx: &Context) -> Result<()> {
    let client = ctx.signed_in_client()?;
    let user = client
        .session()
        .user()
        .context("Failed to read stored user")?;

    if args.json {
        return output::json_pretty(&user);
    }

    output::field("API", client.config().api_url.as_str());
    match user {
        Some(user) => {
            for (label, key) in [("Name", "name"), ("User name", "user_name"), ("Email", "email")] {
                if let Some(value) = user.get(key).and_then(|v| v.as_str()) {
                    output::field(label, value);
                }
            }
        }
        None => output::field("User", "(no user record stored)"),
    }

    Ok(())
}
