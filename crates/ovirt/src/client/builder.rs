//! Client construction.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, instrument};

use crate::Result;
use crate::auth::{AuthContext, AuthStrategy, CookieAuth, Credentials, TokenAuth};
use crate::error::InvalidInputError;
use crate::logger::{Logger, TracingLogger};
use crate::types::ApiUrl;

use super::{Client, ClientInner};

/// Configures and connects a [`Client`].
///
/// Defaults: token authentication, TLS verification on, [`TracingLogger`],
/// debug off, re-auth policy taken from the strategy, reqwest's default
/// timeout.
///
/// # Example
///
/// ```no_run
/// use ovirt::{Client, StdoutLogger};
///
/// # async fn example() -> Result<(), ovirt::Error> {
/// let client = Client::builder("https://engine.example.com/ovirt-engine/api", "admin@internal", "secret")
///     .cookie_auth()
///     .insecure(true)
///     .logger(StdoutLogger)
///     .debug(true)
///     .connect()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    url: String,
    credentials: Credentials,
    strategy: Option<Box<dyn AuthStrategy>>,
    insecure: bool,
    logger: Option<Arc<dyn Logger>>,
    debug: bool,
    retry_on_unauthorized: Option<bool>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    pub(crate) fn new(url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            url: url.into(),
            credentials,
            strategy: None,
            insecure: false,
            logger: None,
            debug: false,
            retry_on_unauthorized: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Authenticate with an SSO bearer token (the default).
    pub fn token_auth(self) -> Self {
        self.auth_strategy(TokenAuth::new())
    }

    /// Authenticate with HTTP Basic and a persistent-auth session cookie.
    pub fn cookie_auth(self) -> Self {
        self.auth_strategy(CookieAuth::new())
    }

    /// Use a custom authentication strategy.
    pub fn auth_strategy(mut self, strategy: impl AuthStrategy + 'static) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    /// Skip TLS certificate verification.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Route request and status messages to `logger`.
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Share an existing logger.
    pub fn shared_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Log full response bodies.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Override the strategy's policy for re-authenticating once on `401`.
    pub fn retry_on_unauthorized(mut self, retry: bool) -> Self {
        self.retry_on_unauthorized = Some(retry);
        self
    }

    /// Set a total timeout for each HTTP round trip.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the transport and authenticate.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the engine is unreachable, or
    /// authentication fails. No client exists in that case.
    #[instrument(skip(self), fields(url = %self.url, username = %self.credentials.username()))]
    pub async fn connect(self) -> Result<Client> {
        let api = ApiUrl::new(&self.url)?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| concat!("ovirt/", env!("CARGO_PKG_VERSION")).to_string());

        let mut http = reqwest::Client::builder()
            .user_agent(user_agent)
            .danger_accept_invalid_certs(self.insecure);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http.build().map_err(|e| InvalidInputError::HttpClient {
            message: e.to_string(),
        })?;

        let strategy = self
            .strategy
            .unwrap_or_else(|| Box::new(TokenAuth::new()));
        let retry_on_unauthorized = self
            .retry_on_unauthorized
            .unwrap_or_else(|| strategy.retries_on_unauthorized());
        let logger = self.logger.unwrap_or_else(|| Arc::new(TracingLogger));

        info!(strategy = strategy.name(), insecure = self.insecure, "Connecting");

        let credential = strategy
            .authenticate(AuthContext {
                http: &http,
                api: &api,
                credentials: &self.credentials,
            })
            .await?;
        credential.check_header(strategy.credential_header())?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                api,
                credentials: self.credentials,
                http,
                strategy,
                logger,
                debug: self.debug,
                retry_on_unauthorized,
                credential: RwLock::new(credential),
                reauth: Mutex::new(()),
                closed: AtomicBool::new(false),
            }),
        })
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("url", &self.url)
            .field("credentials", &self.credentials)
            .field("strategy", &self.strategy)
            .field("insecure", &self.insecure)
            .field("debug", &self.debug)
            .field("retry_on_unauthorized", &self.retry_on_unauthorized)
            .field("timeout", &self.timeout)
            .finish()
    }
}
