//! Forgot-password command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct ForgotPasswordArgs {
    /// Account email
    #[arg(long)]
    pub email: String,
}

pub async fn run(args: ForgotPasswordArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let message = client
        .auth()
        .request_password_reset(&args.email)
        .await
        .context("Failed to request password reset")?;

    output::confirmation(message, "Password reset code sent");
    Ok(())
}
