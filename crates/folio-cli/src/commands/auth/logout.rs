//! Logout command implementation.

use anyhow::Result;
use clap::Args;
use tracing::warn;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    // The local session is gone either way; a failed server call only warrants a warning.
    match client.auth().logout().await {
        Ok(message) => output::confirmation(message, "Logged out"),
        Err(e) => {
            warn!(error = %e, "Server logout failed");
            output::success("Logged out locally");
        }
    }

    Ok(())
}
