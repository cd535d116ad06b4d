//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::blog::BlogCommand;
use crate::commands::profile::ProfileCommand;

/// Admin client for the folio blog backend.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version = env!("FOLIO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Backend base URL
    #[arg(long, env = "FOLIO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Credential file (defaults to the platform data directory)
    #[arg(long, env = "FOLIO_STORE", global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in, register and manage the session
    Auth(AuthCommand),

    /// Manage blog posts
    Blog(BlogCommand),

    /// Edit profile sections
    Profile(ProfileCommand),
}
