//! folio - command-line admin client for the folio blog backend.
//!
//! A thin wrapper over `folio-http`: every command builds an
//! [`AuthenticatedClient`](folio_http::AuthenticatedClient) over the on-disk
//! credential store, so sessions persist between invocations and expired
//! access tokens are refreshed transparently.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{auth, blog, profile};
use session::Context;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let ctx = Context::new(cli.api_url, cli.store);

    match cli.command {
        Commands::Auth(cmd) => auth::handle(cmd, &ctx).await,
        Commands::Blog(cmd) => blog::handle(cmd, &ctx).await,
        Commands::Profile(cmd) => profile::handle(cmd, &ctx).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so command output on stdout stays machine-readable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
