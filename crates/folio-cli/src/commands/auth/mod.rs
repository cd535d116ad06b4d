//! Auth subcommand implementations.

mod forgot_password;
mod login;
mod logout;
mod otp;
mod refresh_token;
mod register;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::session::Context;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Submit credentials; the backend emails a sign-in code
    Login(login::LoginArgs),

    /// Create an account; the backend emails a verification code
    Register(register::RegisterArgs),

    /// Verify an emailed code (completes sign-in for --purpose login)
    VerifyOtp(otp::VerifyOtpArgs),

    /// Ask for a new code
    ResendOtp(otp::ResendOtpArgs),

    /// Start a password reset
    ForgotPassword(forgot_password::ForgotPasswordArgs),

    /// End the session
    Logout(logout::LogoutArgs),

    /// Display the signed-in user
    Whoami(whoami::WhoamiArgs),

    /// Refresh the access token
    RefreshToken(refresh_token::RefreshTokenArgs),
}

pub async fn handle(cmd: AuthCommand, ctx: &Context) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, ctx).await,
        AuthSubcommand::Register(args) => register::run(args, ctx).await,
        AuthSubcommand::VerifyOtp(args) => otp::verify(args, ctx).await,
        AuthSubcommand::ResendOtp(args) => otp::resend(args, ctx).await,
        AuthSubcommand::ForgotPassword(args) => forgot_password::run(args, ctx).await,
        AuthSubcommand::Logout(args) => logout::run(args, ctx).await,
        AuthSubcommand::Whoami(args) => whoami::run(args, ctx).await,
        AuthSubcommand::RefreshToken(args) => refresh_token::run(args, ctx).await,
    }
}
