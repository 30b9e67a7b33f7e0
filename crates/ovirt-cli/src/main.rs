//! ovirt - CLI tool for the oVirt engine REST API.
//!
//! This is a thin wrapper over the `ovirt` library, intended for manual
//! exploration and debugging against an engine.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs, cli.connection.debug);

    commands::handle(cli).await
}

fn init_logging(verbosity: u8, json: bool, debug: bool) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Response bodies are logged at debug level under the `ovirt` target.
    let filter = if debug && verbosity < 2 {
        format!("{level},ovirt=debug")
    } else {
        level.to_string()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // stdout is reserved for response bodies.
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
