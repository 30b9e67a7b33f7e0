//! Ping command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct PingArgs {}

pub async fn run(connection: &ConnectionArgs, _args: PingArgs) -> Result<()> {
    eprintln!("{}", "Connecting...".dimmed());

    let client = super::connect(connection).await?;

    output::success("Authenticated");
    output::field("API", client.api_url().as_str());
    output::field("User", client.username());

    client.close().await;

    Ok(())
}
