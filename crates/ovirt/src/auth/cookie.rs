//! HTTP Basic login with a persistent-auth session cookie.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::{RequestBuilder, StatusCode};
use tracing::{debug, instrument};

use crate::Result;
use crate::error::AuthError;

use super::strategy::{AuthContext, AuthStrategy};
use super::{APPLICATION_XML, PERSISTENT_AUTH, PREFER, SessionCredential};

/// Basic-auth login that keeps the engine's session cookie.
///
/// The engine issues the cookie when the login carries
/// `Prefer: persistent-auth`; later requests send it back instead of the
/// password. This strategy does not retry on `401` unless the client is
/// configured to.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieAuth;

impl CookieAuth {
    /// Create the cookie strategy.
    pub fn new() -> Self {
        Self
    }
}

/// Extracts the `name=value` part of a `Set-Cookie` header.
fn session_cookie(set_cookie: &str) -> Option<&str> {
    set_cookie
        .split(';')
        .next()
        .map(str::trim)
        .filter(|c| !c.is_empty())
}

#[async_trait]
impl AuthStrategy for CookieAuth {
    fn name(&self) -> &'static str {
        "cookie"
    }

    #[instrument(skip(self, ctx), fields(api = %ctx.api, username = %ctx.credentials.username()))]
    async fn authenticate(&self, ctx: AuthContext<'_>) -> Result<SessionCredential> {
        debug!("Opening persistent session");

        let response = ctx
            .http
            .head(ctx.api.as_str())
            .basic_auth(ctx.credentials.username(), Some(ctx.credentials.password()))
            .header(PREFER, PERSISTENT_AUTH)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AuthError::rejected(status).into());
        }

        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(session_cookie)
            .ok_or(AuthError::MissingCookie)?;

        debug!("Session cookie obtained");
        Ok(SessionCredential::new(cookie))
    }

    fn apply(&self, request: RequestBuilder, credential: &SessionCredential) -> RequestBuilder {
        request
            .header(CONTENT_TYPE, APPLICATION_XML)
            .header(PREFER, PERSISTENT_AUTH)
            .header(COOKIE, credential.as_str())
    }

    fn credential_header(&self) -> &'static str {
        "cookie"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_takes_first_segment() {
        assert_eq!(
            session_cookie("JSESSIONID=abc123; Path=/ovirt-engine/api; Secure; HttpOnly"),
            Some("JSESSIONID=abc123")
        );
        assert_eq!(session_cookie("JSESSIONID=abc123"), Some("JSESSIONID=abc123"));
    }

    #[test]
    fn session_cookie_rejects_empty_value() {
        assert_eq!(session_cookie(""), None);
        assert_eq!(session_cookie(" ; Path=/"), None);
    }

    #[test]
    fn cookie_strategy_does_not_retry_by_default() {
        assert!(!CookieAuth::new().retries_on_unauthorized());
    }

    #[test]
    fn apply_sets_cookie_and_prefer_headers() {
        let http = reqwest::Client::new();
        let request = CookieAuth
            .apply(
                http.get("http://127.0.0.1/api/vms"),
                &SessionCredential::new("JSESSIONID=abc"),
            )
            .build()
            .unwrap();

        let headers = request.headers();
        assert_eq!(headers["cookie"], "JSESSIONID=abc");
        assert_eq!(headers["prefer"], "persistent-auth");
        assert_eq!(headers["content-type"], "application/xml");
        assert!(headers.get("authorization").is_none());
    }
}
