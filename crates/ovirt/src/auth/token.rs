//! SSO bearer token authentication.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::Result;
use crate::error::{AuthError, ParseError, body_read_error};

use super::strategy::{AuthContext, AuthStrategy};
use super::{APPLICATION_XML, SessionCredential};

const GRANT_TYPE: &str = "password";
const SCOPE: &str = "ovirt-app-api";

/// Response of the SSO token endpoint.
#[derive(Debug, Deserialize)]
struct SsoResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_code: Option<String>,
}

/// OAuth password-grant login against the engine's SSO endpoint.
///
/// Requests carry `Authorization: Bearer <token>`. An expired token shows up
/// as a `401`, so this strategy re-authenticates and retries by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenAuth;

impl TokenAuth {
    /// Create the token strategy.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuthStrategy for TokenAuth {
    fn name(&self) -> &'static str {
        "token"
    }

    #[instrument(skip(self, ctx), fields(api = %ctx.api, username = %ctx.credentials.username()))]
    async fn authenticate(&self, ctx: AuthContext<'_>) -> Result<SessionCredential> {
        let url = ctx.api.sso_token_url();
        debug!(%url, "Requesting SSO token");

        let form = [
            ("grant_type", GRANT_TYPE),
            ("scope", SCOPE),
            ("username", ctx.credentials.username()),
            ("password", ctx.credentials.password()),
        ];

        let response = ctx
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .form(&form[..])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await.map_err(body_read_error)?;

        match serde_json::from_slice::<SsoResponse>(&body) {
            Ok(sso) => {
                if let Some(error) = sso.error.filter(|e| !e.is_empty()) {
                    return Err(AuthError::Sso {
                        error,
                        code: sso.error_code.filter(|c| !c.is_empty()),
                    }
                    .into());
                }
                if status != StatusCode::OK {
                    return Err(AuthError::rejected(status).into());
                }
                let token = sso
                    .access_token
                    .filter(|t| !t.is_empty())
                    .ok_or(AuthError::MissingToken)?;

                debug!("SSO token obtained");
                Ok(SessionCredential::new(token))
            }
            Err(_) if status != StatusCode::OK => Err(AuthError::rejected(status).into()),
            Err(err) => Err(ParseError::Json(err).into()),
        }
    }

    fn apply(&self, request: RequestBuilder, credential: &SessionCredential) -> RequestBuilder {
        request
            .bearer_auth(credential.as_str())
            .header(CONTENT_TYPE, APPLICATION_XML)
            .header(ACCEPT, APPLICATION_XML)
    }

    fn retries_on_unauthorized(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sso_response_tolerates_missing_fields() {
        let sso: SsoResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(sso.access_token.as_deref(), Some("abc"));
        assert!(sso.error.is_none());
        assert!(sso.error_code.is_none());
    }

    #[test]
    fn token_strategy_retries_by_default() {
        assert!(TokenAuth::new().retries_on_unauthorized());
    }

    #[test]
    fn apply_sets_bearer_and_xml_headers() {
        let http = reqwest::Client::new();
        let request = TokenAuth
            .apply(
                http.get("http://127.0.0.1/api/vms"),
                &SessionCredential::new("tok"),
            )
            .build()
            .unwrap();

        let headers = request.headers();
        assert_eq!(headers["authorization"], "Bearer tok");
        assert_eq!(headers["content-type"], "application/xml");
        assert_eq!(headers["accept"], "application/xml");
    }
}
