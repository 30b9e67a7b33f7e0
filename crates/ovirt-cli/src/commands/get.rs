//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Resource path relative to the API root (e.g., vms or /vms/123/nics)
    pub path: String,
}

pub async fn run(connection: &ConnectionArgs, args: GetArgs) -> Result<()> {
    let client = super::connect(connection).await?;

    let result = client.get(&args.path).await;
    client.close().await;

    let body = result.with_context(|| format!("Failed to get {}", args.path))?;
    output::body(&body)
}
