//! tado° API client
//!
//! Wires the base URL, user agent and authenticator together. Credentials are
//! obtained lazily: the first dispatch (or [`Client::initialize`]) asks the
//! authenticator for a token source, which is then shared by every request
//! of the client and its clones.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Request};
use serde::Serialize;
use tado_common::auth::{
    AuthError, AuthMethod, Authenticator, OAuthConfig, TokenAuthenticator, TokenSet, TokenSource,
};
use tado_common::Context;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};
use url::Url;

use super::errors::ApiError;
use super::request::{self, RequestOption};
use super::response::{DecodeTarget, Response, ResponseInfo};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://my.tado.com/api/v2/";

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = "go-tado";

/// Deadline [`Client::send`] uses when called without a context.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client paired with the token source of one authenticated session
#[derive(Clone)]
struct AuthenticatedCaller {
    http: reqwest::Client,
    tokens: Arc<dyn TokenSource>,
}

impl AuthenticatedCaller {
    async fn authorize(&self, ctx: &Context, request: &mut Request) -> Result<(), ApiError> {
        let token = ctx.run(self.tokens.token()).await??;

        let mut value = HeaderValue::try_from(token.authorization_value()).map_err(|_| {
            ApiError::Auth(AuthError::Config("access token is not a valid header value".to_string()))
        })?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    user_agent: Option<HeaderValue>,
    authenticator: Arc<dyn Authenticator>,
    caller: OnceCell<AuthenticatedCaller>,
}

/// Client for the tado° REST API
///
/// Cheap to clone; clones share configuration and credentials. The client is
/// safe for concurrent use from many tasks. Reconfiguration
/// ([`Client::with_authenticator`], [`Client::with_oauth_client`]) returns a
/// new client and leaves this one untouched.
///
/// # Examples
/// ```no_run
/// use tado::{Client, Context};
///
/// # async fn run() -> Result<(), tado::ApiError> {
/// let client = Client::new()?;
/// let me = client.user().get(&Context::background()).await?;
/// println!("Logged in as {}", me.email);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Client with default settings and the device authorization flow
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if the HTTP client cannot be created
    pub fn new() -> Result<Self, ApiError> {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// A copy of the configured base URL
    #[must_use]
    pub fn base_url(&self) -> Url {
        self.inner.base_url.clone()
    }

    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.inner.user_agent.as_ref().and_then(|value| value.to_str().ok())
    }

    /// Whether credentials have been obtained yet
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.inner.caller.initialized()
    }

    /// Obtain credentials now instead of on the first request
    ///
    /// Runs the authenticator (for the device flow this blocks until the user
    /// has logged in). Repeated or concurrent calls authenticate once. A
    /// failed attempt is not remembered, so the next call tries again.
    ///
    /// # Errors
    /// Returns [`ApiError::Auth`] or [`ApiError::Context`] if authentication
    /// fails or `ctx` finishes first
    pub async fn initialize(&self, ctx: &Context) -> Result<(), ApiError> {
        self.caller(ctx).await.map(|_| ())
    }

    async fn caller(&self, ctx: &Context) -> Result<&AuthenticatedCaller, ApiError> {
        self.inner
            .caller
            .get_or_try_init(|| async {
                info!("Initializing authenticated HTTP caller");
                let tokens = ctx.run(self.inner.authenticator.token_source(ctx)).await??;
                Ok::<_, ApiError>(AuthenticatedCaller { http: self.inner.http.clone(), tokens })
            })
            .await
    }

    /// Same settings, different authenticator
    ///
    /// The returned client authenticates on its own first use; `self` keeps
    /// its credentials.
    #[must_use]
    pub fn with_authenticator(&self, authenticator: impl Authenticator + 'static) -> Self {
        self.with_shared_authenticator(Arc::new(authenticator))
    }

    /// Same settings, authenticated with a token obtained elsewhere
    ///
    /// With `config` the token is renewed through its refresh token; without
    /// it the token is used until it expires.
    #[must_use]
    pub fn with_oauth_client(&self, config: Option<OAuthConfig>, token: TokenSet) -> Self {
        self.with_authenticator(TokenAuthenticator::new(config, token))
    }

    fn with_shared_authenticator(&self, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: self.inner.http.clone(),
                base_url: self.inner.base_url.clone(),
                user_agent: self.inner.user_agent.clone(),
                authenticator,
                caller: OnceCell::new(),
            }),
        }
    }

    /// Build a request for `path` relative to the base URL
    ///
    /// A leading `/` in `path` is ignored. `body`, when given, is sent as JSON
    /// followed by a newline. `options` are applied last and may replace the
    /// default headers.
    ///
    /// # Errors
    /// - [`ApiError::Config`] if the base URL does not end in `/`
    /// - [`ApiError::InvalidUrl`] or [`ApiError::PathEscapesBase`] for a bad
    ///   path
    /// - [`ApiError::InvalidMethod`] for a bad method
    /// - [`ApiError::Encode`] if `body` cannot be serialized
    pub fn new_request<M, B>(
        &self,
        method: M,
        path: &str,
        body: Option<&B>,
        options: &[RequestOption],
    ) -> Result<Request, ApiError>
    where
        M: TryInto<Method>,
        M::Error: fmt::Display,
        B: Serialize + ?Sized,
    {
        request::build(
            &self.inner.base_url,
            self.inner.user_agent.as_ref(),
            method,
            path,
            body,
            options,
        )
    }

    /// Send `request` and hand back the response unread
    ///
    /// HTTP error statuses are returned as responses, not errors; see
    /// [`Response::error_for_status`].
    ///
    /// # Errors
    /// - [`ApiError::MissingContext`] if `ctx` is `None`; nothing is sent
    /// - [`ApiError::Context`] if `ctx` is done before or while sending,
    ///   regardless of the underlying transport failure
    /// - [`ApiError::Auth`] if credentials cannot be obtained
    /// - [`ApiError::Transport`] for network failures
    #[instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn dispatch(
        &self,
        ctx: Option<&Context>,
        request: Request,
    ) -> Result<Response, ApiError> {
        let ctx = ctx.ok_or(ApiError::MissingContext)?;
        if let Some(err) = ctx.err() {
            return Err(err.into());
        }

        let caller = self.caller(ctx).await?;
        let mut request = request;
        caller.authorize(ctx, &mut request).await?;

        debug!("Sending request");

        match ctx.run(caller.http.execute(request)).await {
            Ok(Ok(response)) => {
                debug!(status = %response.status(), "Received response");
                Ok(Response::new(response))
            }
            Ok(Err(err)) => {
                if let Some(ctx_err) = ctx.err() {
                    return Err(ctx_err.into());
                }
                Err(ApiError::Transport(sanitize(err)))
            }
            Err(ctx_err) => Err(ctx_err.into()),
        }
    }

    /// Dispatch `request` and decode its body into `target`
    ///
    /// A `None` context is replaced by one expiring after
    /// [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    /// Any error of [`Client::dispatch`] or [`Response::decode`]
    pub async fn send(
        &self,
        ctx: Option<&Context>,
        request: Request,
        target: DecodeTarget<'_>,
    ) -> Result<ResponseInfo, ApiError> {
        let fallback;
        let ctx = match ctx {
            Some(ctx) => ctx,
            None => {
                fallback = Context::with_timeout(DEFAULT_TIMEOUT);
                &fallback
            }
        };

        let response = self.dispatch(Some(ctx), request).await?;
        ctx.run(response.decode(target)).await?
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("user_agent", &self.user_agent())
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

/// Strip credentials and fragment from the URL carried by a transport error.
fn sanitize(mut err: reqwest::Error) -> reqwest::Error {
    if let Some(url) = err.url_mut() {
        let _ = url.set_username("");
        let _ = url.set_password(None);
        url.set_fragment(None);
    }
    err
}

/// Builder for [`Client`]
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl ClientBuilder {
    /// API base URL; must end in `/` for requests to be built
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// `User-Agent` header; an empty string sends none
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Overall timeout of each HTTP request (ignored with [`Self::http_client`])
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    #[must_use]
    pub fn auth(mut self, method: AuthMethod) -> Self {
        self.authenticator = Some(method.into_authenticator());
        self
    }

    #[must_use]
    pub fn authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    /// # Errors
    /// Returns [`ApiError::Config`] if the base URL does not parse, the user
    /// agent is not a valid header value, or the HTTP client cannot be built
    pub fn build(self) -> Result<Client, ApiError> {
        let raw_base = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw_base)
            .map_err(|e| ApiError::Config(format!("invalid base URL {raw_base:?}: {e}")))?;

        let user_agent = match self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT) {
            "" => None,
            agent => Some(HeaderValue::try_from(agent).map_err(|e| {
                ApiError::Config(format!("invalid user agent {agent:?}: {e}"))
            })?),
        };

        let http = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder
                    .build()
                    .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?
            }
        };

        let authenticator =
            self.authenticator.unwrap_or_else(|| AuthMethod::default().into_authenticator());

        debug!(base_url = %base_url, "Built tado client");

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                user_agent,
                authenticator,
                caller: OnceCell::new(),
            }),
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("authenticator", &self.authenticator.is_some())
            .finish_non_exhaustive()
    }
}
