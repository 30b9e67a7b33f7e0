use std::fmt;

use reqwest::header::HeaderValue;

use crate::error::InvalidInputError;

/// The credential attached to every request of an authenticated session.
///
/// Depending on the strategy this is an SSO bearer token or the
/// `name=value` pair of the engine's session cookie.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential(String);

impl SessionCredential {
    /// Wrap a credential value obtained from the engine.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the credential value for use in request headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fails unless the credential can be sent in the `name` header.
    pub(crate) fn check_header(&self, name: &'static str) -> Result<(), InvalidInputError> {
        HeaderValue::from_str(&self.0)
            .map(|_| ())
            .map_err(|_| InvalidInputError::Header { name })
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionCredential")
            .field(&"[REDACTED]")
            .finish()
    }
}
