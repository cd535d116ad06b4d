//! Login command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use folio_core::Credentials;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let credentials = Credentials::new(&args.email, &args.password);

    output::progress("Signing in...");

    let message = client
        .auth()
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::confirmation(message, "OTP sent to your email");
    println!();
    println!(
        "Complete sign-in with: folio auth verify-otp --email {} --code <CODE> --purpose login",
        args.email
    );

    Ok(())
}
