//! aacnews-cli: command-line front end for the AACNews admin API.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;


use aacnews_admin::{config, telemetry};
use clap::Parser;

use args::{Cli, Commands};
use client::{CliError, build_client};
use handlers::{auth, cross_post, newsletters, posts, types};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = config::load(&cli.config)?;
    telemetry::init(&settings.logging)?;

    match cli.command {
        Commands::Auth(cmd) => auth::handle(&settings, cmd.action)?,
        Commands::Types(cmd) => types::handle(&build_client(&settings)?, cmd.action).await?,
        Commands::Posts(cmd) => posts::handle(&build_client(&settings)?, cmd.action).await?,
        Commands::Newsletters(cmd) => {
            newsletters::handle(&build_client(&settings)?, cmd.action).await?;
        }
        Commands::CrossPost(cmd) => {
            cross_post::handle(&build_client(&settings)?, cmd.action).await?;
        }
    }

    Ok(())
}
