//! Send command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ovirt::{Bytes, Method};

use crate::cli::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// HTTP method (GET, POST, PUT, DELETE, ...)
    pub method: String,

    /// Resource path relative to the API root
    pub path: String,

    /// XML request body
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// File containing the XML request body
    #[arg(long)]
    pub body_file: Option<PathBuf>,
}

pub async fn run(connection: &ConnectionArgs, args: SendArgs) -> Result<()> {
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method: {}", args.method))?;

    let body = match (&args.body, &args.body_file) {
        (Some(body), _) => Some(Bytes::from(body.clone())),
        (None, Some(path)) => Some(Bytes::from(
            std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        )),
        (None, None) => None,
    };

    let client = super::connect(connection).await?;

    let result = client.send_request(&args.path, method.clone(), body).await;
    client.close().await;

    let response = result.with_context(|| format!("{} {} failed", method, args.path))?;
    if !response.is_empty() {
        output::body(&response)?;
    }

    Ok(())
}
