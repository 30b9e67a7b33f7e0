//! CLI argument definitions.

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ovirt::ApiUrl;

use crate::commands::get::GetArgs;
use crate::commands::ping::PingArgs;
use crate::commands::send::SendArgs;

/// oVirt CLI tool for REST API exploration.
#[derive(Parser, Debug)]
#[command(name = "ovirt")]
#[command(author, version = env!("OVIRT_CLI_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// How to reach and log in to the engine.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Engine API URL (e.g., https://engine.example.com/ovirt-engine/api)
    #[arg(long, env = "OVIRT_URL")]
    pub url: ApiUrl,

    /// User name, including the profile (e.g., admin@internal)
    #[arg(long, env = "OVIRT_USERNAME")]
    pub username: String,

    /// Password
    #[arg(long, env = "OVIRT_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Skip TLS certificate verification (OVIRT_INSECURE=0/false/no/off disables)
    #[arg(long, env = "OVIRT_INSECURE", value_parser = FalseyValueParser::new())]
    pub insecure: bool,

    /// Authentication method
    #[arg(long, value_enum, default_value_t = AuthMethod::Token)]
    pub auth: AuthMethod,

    /// Log full response bodies
    #[arg(long)]
    pub debug: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AuthMethod {
    /// SSO bearer token
    Token,
    /// HTTP Basic with a persistent session cookie
    Cookie,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a resource and print its XML
    Get(GetArgs),

    /// Send a request with any method and optional XML body
    Send(SendArgs),

    /// Check that the engine accepts the credentials
    Ping(PingArgs),
}
