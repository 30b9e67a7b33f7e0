//! The pluggable authentication capability.

use async_trait::async_trait;
use reqwest::RequestBuilder;

use crate::Result;
use crate::types::ApiUrl;

use super::credentials::Credentials;
use super::session_credential::SessionCredential;

/// What a strategy needs to log in.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext<'a> {
    /// Transport shared with the client, configured with its TLS mode.
    pub http: &'a reqwest::Client,
    /// API root of the engine.
    pub api: &'a ApiUrl,
    /// Login credentials.
    pub credentials: &'a Credentials,
}

/// A way of obtaining a session credential and attaching it to requests.
///
/// `authenticate` derives a fresh credential from scratch on every call and
/// must be safe to call repeatedly; the client replaces its stored credential
/// with the result.
#[async_trait]
pub trait AuthStrategy: Send + Sync + std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Log in and return a new session credential.
    async fn authenticate(&self, ctx: AuthContext<'_>) -> Result<SessionCredential>;

    /// Attach the credential and strategy headers to an outgoing request.
    fn apply(&self, request: RequestBuilder, credential: &SessionCredential) -> RequestBuilder;

    /// Header that carries the credential, reported when the credential is
    /// not a valid header value.
    fn credential_header(&self) -> &'static str {
        "authorization"
    }

    /// Whether a `401` should trigger one re-authentication and retry when
    /// the client was not configured explicitly.
    fn retries_on_unauthorized(&self) -> bool {
        false
    }
}
