//! Register command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unique user name
    #[arg(long)]
    pub user_name: String,

    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let email = client
        .auth()
        .register(&args.name, &args.user_name, &args.email, &args.password)
        .await
        .context("Failed to register")?;

    output::success("Registration successful");
    output::field("Verification code sent to", &email);

    Ok(())
}
