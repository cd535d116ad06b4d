//! Profile subcommand implementations.
//!
//! List sections are replaced wholesale with the values given.

mod hobbies;
mod quote;
mod reading;
mod social;
mod upload;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::session::Context;

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    /// Set the profile quote
    Quote(quote::QuoteArgs),

    /// Replace the hobbies list
    Hobbies(hobbies::HobbiesArgs),

    /// Replace the social media links
    Social(social::SocialArgs),

    /// Replace the reading list
    Reading(reading::ReadingArgs),

    /// Replace the banner, profile image or resume
    Upload(upload::UploadArgs),
}

pub async fn handle(cmd: ProfileCommand, ctx: &Context) -> Result<()> {
    match cmd.command {
        ProfileSubcommand::Quote(args) => quote::run(args, ctx).await,
        ProfileSubcommand::Hobbies(args) => hobbies::run(args, ctx).await,
        ProfileSubcommand::Social(args) => social::run(args, ctx).await,
        ProfileSubcommand::Reading(args) => reading::run(args, ctx).await,
        ProfileSubcommand::Upload(args) => upload::run(args, ctx).await,
    }
}

/// Split a `NAME=VALUE` argument at the first `=`.
fn split_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() && !value.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_pair_uses_first_equals() {
        assert_eq!(
            split_pair("github=https://x.test/?a=b").unwrap(),
            ("github".to_string(), "https://x.test/?a=b".to_string())
        );
        assert!(split_pair("github").is_err());
        assert!(split_pair("=url").is_err());
    }
}
