//! ovirt - oVirt engine REST API client
//!
//! This library authenticates against an oVirt engine and issues authenticated
//! requests against its REST API. All operations flow through a [`Client`],
//! which holds the session credential and transparently re-authenticates once
//! when the engine answers `401 Unauthorized`.
//!
//! Two authentication strategies are provided:
//!
//! - [`TokenAuth`]: SSO bearer token obtained through the OAuth password grant.
//! - [`CookieAuth`]: HTTP Basic login with a persistent-auth session cookie.
//!
//! # Example
//!
//! ```no_run
//! use ovirt::Client;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Api {
//!     product_info: ProductInfo,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct ProductInfo {
//!     name: String,
//! }
//!
//! # async fn example() -> Result<(), ovirt::Error> {
//! let client = Client::connect("https://engine.example.com/ovirt-engine/api", "admin@internal", "secret").await?;
//!
//! let api: Api = client.get_and_parse("/").await?;
//! println!("{}", api.product_info.name);
//!
//! client.close().await;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod logger;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{AuthStrategy, CookieAuth, Credentials, SessionCredential, TokenAuth};
pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use logger::{Logger, NoopLogger, StdoutLogger, TracingLogger};
pub use types::ApiUrl;

pub use bytes::Bytes;
pub use reqwest::Method;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
