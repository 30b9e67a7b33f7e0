//! Authentication strategies and credential types.
//!
//! A [`Client`](crate::Client) is parameterized over an [`AuthStrategy`]:
//! [`TokenAuth`] exchanges the credentials for an SSO bearer token,
//! [`CookieAuth`] logs in with HTTP Basic and keeps the persistent-auth
//! session cookie.

mod cookie;
mod credentials;
mod session_credential;
mod strategy;
mod token;

pub use cookie::CookieAuth;
pub use credentials::Credentials;
pub use session_credential::SessionCredential;
pub use strategy::{AuthContext, AuthStrategy};
pub use token::TokenAuth;

/// Media type of resource requests and responses.
pub(crate) const APPLICATION_XML: &str = "application/xml";

/// Header asking the engine to keep the session alive between requests.
pub(crate) const PREFER: &str = "Prefer";
pub(crate) const PERSISTENT_AUTH: &str = "persistent-auth";
