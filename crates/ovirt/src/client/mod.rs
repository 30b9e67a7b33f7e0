//! Authenticated access to the engine REST API.

mod builder;
mod fault;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::auth::{AuthContext, AuthStrategy, Credentials, SessionCredential};
use crate::error::{Error, ParseError, body_read_error};
use crate::logger::Logger;
use crate::types::ApiUrl;

pub use builder::ClientBuilder;

/// An authenticated connection to an oVirt engine.
///
/// A `Client` is obtained via [`Client::connect()`] or [`Client::builder()`];
/// both log in before returning, so every client holds a session credential.
/// When the engine answers `401` the client can re-authenticate once and
/// replay the request (see [`ClientBuilder::retry_on_unauthorized`]).
///
/// # Thread Safety
///
/// Clients are cheap to clone (they use internal `Arc`) and clones share the
/// session. Re-authentication is serialized, so concurrent callers hitting a
/// `401` at the same time log in only once.
///
/// # Example
///
/// ```no_run
/// use ovirt::Client;
///
/// # async fn example() -> Result<(), ovirt::Error> {
/// let client = Client::connect("https://engine.example.com/ovirt-engine/api", "admin@internal", "secret").await?;
/// let xml = client.get("vms").await?;
/// println!("{}", String::from_utf8_lossy(&xml));
/// client.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    api: ApiUrl,
    credentials: Credentials,
    http: reqwest::Client,
    strategy: Box<dyn AuthStrategy>,
    logger: Arc<dyn Logger>,
    debug: bool,
    retry_on_unauthorized: bool,
    credential: RwLock<SessionCredential>,
    reauth: Mutex<()>,
    closed: AtomicBool,
}

impl Client {
    /// Start configuring a client.
    pub fn builder(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> ClientBuilder {
        ClientBuilder::new(url, Credentials::new(username, password))
    }

    /// Connect with SSO token authentication and default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails or the engine is unreachable.
    pub async fn connect(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(url, username, password).connect().await
    }

    /// Returns the API root this client talks to.
    pub fn api_url(&self) -> &ApiUrl {
        &self.inner.api
    }

    /// Returns the user name the session was opened with.
    pub fn username(&self) -> &str {
        self.inner.credentials.username()
    }

    /// Returns `true` once [`close()`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Fetch a resource and return the raw body.
    pub async fn get(&self, path: &str) -> Result<Bytes> {
        self.send_request(path, Method::GET, None).await
    }

    /// Fetch a resource and deserialize its XML body.
    pub async fn get_and_parse<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_and_parse(path, Method::GET, None).await
    }

    /// Send a request and deserialize the XML response body.
    ///
    /// Request failures are returned as-is; a body that does not match `T`
    /// yields [`ParseError::Xml`].
    pub async fn send_and_parse<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: Option<Bytes>,
    ) -> Result<T> {
        let bytes = self.send_request(path, method, body).await?;
        parse_xml(&bytes)
    }

    /// Serialize `body` to XML and send it.
    ///
    /// The root element is named after the type; use `#[serde(rename = "vm")]`
    /// to match the engine's element names.
    pub async fn send_xml<B: Serialize>(&self, path: &str, method: Method, body: &B) -> Result<Bytes> {
        let xml = quick_xml::se::to_string(body)
            .map_err(|e| ParseError::XmlSerialize(e.to_string()))?;
        self.send_request(path, method, Some(Bytes::from(xml))).await
    }

    /// Serialize `body` to XML, send it, and deserialize the XML response.
    pub async fn send_xml_and_parse<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: &B,
    ) -> Result<T> {
        let bytes = self.send_xml(path, method, body).await?;
        parse_xml(&bytes)
    }

    /// Send a request and return the raw response body.
    ///
    /// `path` is resolved against the API root with leading and trailing
    /// slashes ignored. A `401` triggers one re-authentication and retry when
    /// the policy allows it.
    ///
    /// # Errors
    ///
    /// - [`Error::Closed`] after [`close()`](Self::close)
    /// - [`Error::Transport`] when the engine cannot be reached
    /// - [`Error::Request`] for any status of 300 or above after the retry
    /// - [`Error::Io`] when the body cannot be read
    #[instrument(skip(self, body), fields(api = %self.inner.api, strategy = self.inner.strategy.name()))]
    pub async fn send_request(
        &self,
        path: &str,
        method: Method,
        body: Option<Bytes>,
    ) -> Result<Bytes> {
        self.ensure_open()?;

        let uri = self.inner.api.join(path);
        let (response, used) = self.dispatch(&uri, &method, body.clone()).await?;

        if response.status() == StatusCode::UNAUTHORIZED && self.inner.retry_on_unauthorized {
            match self.refresh_after_unauthorized(&used).await {
                Ok(()) => {
                    debug!("Retrying request with refreshed credential");
                    let (retried, _) = self.dispatch(&uri, &method, body).await?;
                    return self.read_response(retried).await;
                }
                Err(err) => warn!(error = %err, "Re-authentication failed"),
            }
        }

        self.read_response(response).await
    }

    /// Log in again and replace the session credential.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] after [`close()`](Self::close), the
    /// strategy's authentication error, or [`Error::InvalidInput`] when the
    /// new credential cannot be sent as a header. The old credential is kept
    /// on failure.
    pub async fn reauthenticate(&self) -> Result<()> {
        self.ensure_open()?;
        let _guard = self.inner.reauth.lock().await;
        self.authenticate_locked().await
    }

    /// End the session.
    ///
    /// Sends a Basic-authenticated `HEAD` to the API root so the engine can
    /// release the session. Errors are ignored. Every later operation on this
    /// client, or any clone of it, fails with [`Error::Closed`].
    #[instrument(skip(self), fields(api = %self.inner.api))]
    pub async fn close(&self) {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        info!("Closing session");
        let result = self
            .inner
            .http
            .head(self.inner.api.as_str())
            .basic_auth(
                self.inner.credentials.username(),
                Some(self.inner.credentials.password()),
            )
            .send()
            .await;

        if let Err(err) = result {
            debug!(error = %err, "Ignoring error while closing session");
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(Error::Closed)
        } else {
            Ok(())
        }
    }

    fn auth_context(&self) -> AuthContext<'_> {
        AuthContext {
            http: &self.inner.http,
            api: &self.inner.api,
            credentials: &self.inner.credentials,
        }
    }

    /// Callers must hold the `reauth` lock.
    async fn authenticate_locked(&self) -> Result<()> {
        info!(strategy = self.inner.strategy.name(), "Re-authenticating");
        let credential = self.inner.strategy.authenticate(self.auth_context()).await?;
        credential.check_header(self.inner.strategy.credential_header())?;
        *self.inner.credential.write().await = credential;
        Ok(())
    }

    async fn refresh_after_unauthorized(&self, stale: &SessionCredential) -> Result<()> {
        let _guard = self.inner.reauth.lock().await;
        if *self.inner.credential.read().await != *stale {
            debug!("Credential already refreshed by another caller");
            return Ok(());
        }
        self.authenticate_locked().await
    }

    /// Send one request with the current credential, returning the response
    /// and the credential it carried.
    async fn dispatch(
        &self,
        uri: &str,
        method: &Method,
        body: Option<Bytes>,
    ) -> Result<(Response, SessionCredential)> {
        let credential = self.inner.credential.read().await.clone();

        let mut request = self
            .inner
            .strategy
            .apply(self.inner.http.request(method.clone(), uri), &credential);
        if let Some(body) = body {
            request = request.body(body);
        }

        self.inner.logger.debug(format_args!("{} {}", method, uri));
        let response = request.send().await?;
        Ok((response, credential))
    }

    async fn read_response(&self, response: Response) -> Result<Bytes> {
        let status = response.status();
        if status.as_u16() >= 300 {
            let error = fault::request_error(response).await;
            debug!(%error, "Request failed");
            return Err(error.into());
        }

        let body = response.bytes().await.map_err(body_read_error)?;

        self.inner.logger.status(format_args!("Status Code: {}", status));
        if self.inner.debug {
            self.inner
                .logger
                .debug(format_args!("Response: {}", String::from_utf8_lossy(&body)));
        }

        Ok(body)
    }
}

fn parse_xml<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    quick_xml::de::from_reader(bytes).map_err(|e| Error::Parse(ParseError::Xml(e)))
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api", &self.inner.api)
            .field("username", &self.inner.credentials.username())
            .field("strategy", &self.inner.strategy.name())
            .field("retry_on_unauthorized", &self.inner.retry_on_unauthorized)
            .field("closed", &self.is_closed())
            .field("credential", &"[REDACTED]")
            .finish()
    }
}
