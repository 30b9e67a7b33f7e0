//! Subcommand implementations.

pub mod get;
pub mod ping;
pub mod send;

use anyhow::{Context, Result};
use ovirt::Client;
use tracing::debug;

use crate::cli::{AuthMethod, Cli, Commands, ConnectionArgs};

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Get(args) => get::run(&cli.connection, args).await,
        Commands::Send(args) => send::run(&cli.connection, args).await,
        Commands::Ping(args) => ping::run(&cli.connection, args).await,
    }
}

/// Authenticate against the engine described by `args`.
pub async fn connect(args: &ConnectionArgs) -> Result<Client> {
    debug!(url = %args.url, auth = ?args.auth, insecure = args.insecure, "Connecting");

    let builder = Client::builder(args.url.as_str(), &args.username, &args.password)
        .insecure(args.insecure)
        .debug(args.debug)
        .user_agent(concat!("ovirt-cli/", env!("OVIRT_CLI_VERSION")));

    let builder = match args.auth {
        AuthMethod::Token => builder.token_auth(),
        AuthMethod::Cookie => builder.cookie_auth(),
    };

    builder.connect().await.context("Failed to connect")
}
