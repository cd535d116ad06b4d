//! OTP verification and resend commands.

use anyhow::{Context as _, Result};
use clap::Args;

use folio_http::OtpPurpose;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct VerifyOtpArgs {
    /// Email the code was sent to
    #[arg(long)]
    pub email: String,

    /// The 6-character code
    #[arg(long)]
    pub code: String,

    /// Flow the code belongs to (register, login, reset-password,
    /// update-password, email-update)
    #[arg(long, default_value = "register")]
    pub purpose: OtpPurpose,
}

#[derive(Args, Debug)]
pub struct ResendOtpArgs {
    /// Email to send the new code to
    #[arg(long)]
    pub email: String,

    /// Flow the code belongs to
    #[arg(long, default_value = "register")]
    pub purpose: OtpPurpose,
}

pub async fn verify(args: VerifyOtpArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let outcome = client
        .auth()
        .verify_otp(&args.email, &args.code, args.purpose)
        .await
        .context("Failed to verify code")?;

    output::confirmation(outcome.message, "Code verified");

    if outcome.signed_in {
        if let Some(name) = outcome
            .user
            .as_ref()
            .and_then(|u| u.get("name"))
            .and_then(|n| n.as_str())
        {
            output::field("Signed in as", name);
        }
    }
    if let Some(token) = &outcome.reset_token {
        output::field("Reset token", token);
    }

    Ok(())
}

pub async fn resend(args: ResendOtpArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let message = client
        .auth()
        .resend_otp(&args.email, args.purpose)
        .await
        .context("Failed to resend code")?;

    output::confirmation(message, "New code sent");
    Ok(())
}
