//! Error types for the ovirt library.
//!
//! This module provides a unified error type with explicit variants for
//! authentication, HTTP status, transport, parsing, body I/O and input
//! validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for ovirt operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Authentication errors (rejected credentials, SSO errors).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The engine answered with a non-success status.
    #[error("request failed: {0}")]
    Request(#[from] RequestError),

    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Response or request body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Reading the response body failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input validation errors (invalid URL, header value).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The client was closed.
    #[error("client is closed")]
    Closed,
}

impl Error {
    /// Returns the HTTP status when this is a [`RequestError`] or a rejected login.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request(err) => Some(err.status),
            Error::Auth(AuthError::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The engine refused the login request.
    #[error("login rejected: HTTP {status}{}", suffix(" ", .reason))]
    Rejected { status: u16, reason: Option<String> },

    /// The SSO endpoint reported an error.
    #[error("SSO error: {error}{}", parenthesized(.code))]
    Sso { error: String, code: Option<String> },

    /// The SSO response did not contain an access token.
    #[error("SSO response did not contain an access token")]
    MissingToken,

    /// The login response did not set a session cookie.
    #[error("login response did not set a session cookie")]
    MissingCookie,
}

impl AuthError {
    pub(crate) fn rejected(status: reqwest::StatusCode) -> Self {
        AuthError::Rejected {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
        }
    }
}

/// A non-success HTTP response from the engine.
#[derive(Debug)]
pub struct RequestError {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase for the status.
    pub reason: Option<String>,
    /// Fault reason reported by the engine, if the body carried one.
    pub fault: Option<String>,
    /// Fault detail reported by the engine, if the body carried one.
    pub detail: Option<String>,
}

impl RequestError {
    /// Create a new request error.
    pub fn new(status: u16, reason: Option<String>) -> Self {
        Self {
            status,
            reason,
            fault: None,
            detail: None,
        }
    }

    /// Attach the engine's fault reason and detail.
    pub fn with_fault(mut self, fault: Option<String>, detail: Option<String>) -> Self {
        self.fault = fault;
        self.detail = detail;
        self
    }

    /// Check if this is an authentication failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&status_line(self.status, self.reason.as_deref()))?;
        if let Some(ref fault) = self.fault {
            write!(f, ": {}", fault)?;
        }
        if let Some(ref detail) = self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for RequestError {}

fn suffix(sep: &str, value: &Option<String>) -> String {
    value
        .as_deref()
        .map(|v| format!("{sep}{v}"))
        .unwrap_or_default()
}

fn parenthesized(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(|v| format!(" ({v})"))
        .unwrap_or_default()
}

fn status_line(status: u16, reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!("HTTP {} {}", status, reason),
        None => format!("HTTP {}", status),
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP client error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Maps a failure while reading a response body.
pub(crate) fn body_read_error(err: reqwest::Error) -> Error {
    Error::Io(std::io::Error::other(err))
}

/// Body parsing errors.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML body could not be deserialized into the target type.
    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// Request body could not be serialized to XML.
    #[error("cannot serialize XML: {0}")]
    XmlSerialize(String),

    /// JSON body could not be deserialized.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A value could not be used as an HTTP header.
    #[error("invalid value for header '{name}'")]
    Header { name: &'static str },

    /// The HTTP client could not be built.
    #[error("cannot build HTTP client: {message}")]
    HttpClient { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_display_includes_fault() {
        let err = RequestError::new(404, Some("Not Found".to_string())).with_fault(
            Some("Operation Failed".to_string()),
            Some("Entity not found: vm".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "HTTP 404 Not Found: Operation Failed (Entity not found: vm)"
        );
    }

    #[test]
    fn request_error_display_without_reason() {
        let err = RequestError::new(599, None);
        assert_eq!(err.to_string(), "HTTP 599");
    }

    #[test]
    fn sso_error_display_includes_code() {
        let err = AuthError::Sso {
            error: "Cannot authenticate user".to_string(),
            code: Some("access_denied".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "SSO error: Cannot authenticate user (access_denied)"
        );
    }

    #[test]
    fn status_is_exposed_for_request_and_rejected_login() {
        let err: Error = RequestError::new(401, Some("Unauthorized".to_string())).into();
        assert_eq!(err.status(), Some(401));

        let err: Error = AuthError::Rejected {
            status: 403,
            reason: None,
        }
        .into();
        assert_eq!(err.status(), Some(403));

        assert_eq!(Error::Closed.status(), None);
    }
}
