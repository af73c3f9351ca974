//! OAuth 2.0 exchange client
//!
//! Thin wrapper over the [`oauth2`] crate that performs the grants used by the
//! authenticators:
//! - Device authorization request and device access token polling (RFC 8628)
//! - Resource owner password credentials grant
//! - Refresh token grant

use std::time::Duration;

use async_trait::async_trait;
use oauth2::basic::{BasicClient, BasicTokenResponse};
use oauth2::{
    AuthType, ClientId, ClientSecret, DeviceAuthorizationUrl, EndpointNotSet, EndpointSet,
    ErrorResponse, RefreshToken, RequestTokenError, ResourceOwnerPassword, ResourceOwnerUsername,
    Scope, StandardDeviceAuthorizationResponse, TokenUrl,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::traits::TokenRefresher;
use super::types::{OAuthConfig, TokenSet};

type TokenClient =
    BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;
type DeviceClient =
    BasicClient<EndpointNotSet, EndpointSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Error type for OAuth client operations
#[derive(Debug, Error)]
pub enum OAuthClientError {
    /// Invalid configuration (bad endpoint URL, missing device endpoint)
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request to the authorization server failed
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// Authorization server returned an error response
    #[error("OAuth error: {0}")]
    Server(String),

    /// Failed to parse the server response
    #[error("Parse error: {0}")]
    Parse(String),

    /// No refresh token available
    #[error("No refresh token available")]
    NoRefreshToken,

    #[error("OAuth exchange failed: {0}")]
    Other(String),
}

impl<RE, T> From<RequestTokenError<RE, T>> for OAuthClientError
where
    RE: std::error::Error + 'static,
    T: ErrorResponse + 'static,
{
    fn from(err: RequestTokenError<RE, T>) -> Self {
        match err {
            RequestTokenError::ServerResponse(response) => Self::Server(response.to_string()),
            RequestTokenError::Request(source) => Self::Request(source.to_string()),
            RequestTokenError::Parse(source, _) => Self::Parse(source.to_string()),
            RequestTokenError::Other(message) => Self::Other(message),
        }
    }
}

/// Verification details returned by the device authorization endpoint.
#[derive(Debug, Clone)]
pub struct DeviceCode {
    /// Code the user enters on the verification page
    pub user_code: String,

    /// Page where the user enters [`Self::user_code`]
    pub verification_uri: String,

    /// Verification page with the user code already embedded
    pub verification_uri_complete: Option<String>,

    /// Lifetime of the device code
    pub expires_in: Duration,

    details: StandardDeviceAuthorizationResponse,
}

impl DeviceCode {
    fn from_details(details: StandardDeviceAuthorizationResponse) -> Self {
        Self {
            user_code: details.user_code().secret().clone(),
            verification_uri: details.verification_uri().as_str().to_string(),
            verification_uri_complete: details
                .verification_uri_complete()
                .map(|uri| uri.secret().clone()),
            expires_in: details.expires_in(),
            details,
        }
    }

    /// The URI to show the user, preferring the one with the code embedded
    #[must_use]
    pub fn login_uri(&self) -> &str {
        self.verification_uri_complete.as_deref().unwrap_or(&self.verification_uri)
    }
}

/// OAuth 2.0 client bound to one [`OAuthConfig`]
#[derive(Debug, Clone)]
pub struct OAuthClient {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl OAuthClient {
    /// Create a new OAuth client with the given configuration
    ///
    /// # Examples
    /// ```
    /// use tado_common::auth::{OAuthClient, OAuthConfig};
    ///
    /// let client = OAuthClient::new(OAuthConfig::tado());
    /// assert_eq!(client.config().scope_string(), "offline-access");
    /// ```
    #[must_use]
    pub fn new(config: OAuthConfig) -> Self {
        // Token endpoints are never followed through redirects.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build OAuth HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self { config, http }
    }

    /// Create a client that exchanges tokens through `http`
    ///
    /// `http` should be configured with redirects disabled.
    #[must_use]
    pub const fn with_http_client(config: OAuthConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Get a reference to the OAuth configuration
    #[must_use]
    pub const fn config(&self) -> &OAuthConfig {
        &self.config
    }

    fn scopes(&self) -> impl Iterator<Item = Scope> + '_ {
        self.config.scopes.iter().cloned().map(Scope::new)
    }

    fn token_client(&self) -> Result<TokenClient, OAuthClientError> {
        let token_url = TokenUrl::new(self.config.token_url.clone())
            .map_err(|e| OAuthClientError::Config(format!("invalid token URL: {e}")))?;

        let mut client = BasicClient::new(ClientId::new(self.config.client_id.clone()))
            .set_auth_type(AuthType::RequestBody)
            .set_token_uri(token_url);

        if let Some(secret) = &self.config.client_secret {
            client = client.set_client_secret(ClientSecret::new(secret.clone()));
        }

        Ok(client)
    }

    fn device_client(&self) -> Result<DeviceClient, OAuthClientError> {
        let url = self.config.device_authorization_url.clone().ok_or_else(|| {
            OAuthClientError::Config("device authorization URL is not configured".to_string())
        })?;
        let device_url = DeviceAuthorizationUrl::new(url).map_err(|e| {
            OAuthClientError::Config(format!("invalid device authorization URL: {e}"))
        })?;

        Ok(self.token_client()?.set_device_authorization_url(device_url))
    }

    /// Start the device authorization flow
    ///
    /// # Errors
    /// Returns error if the device endpoint is not configured or the request
    /// fails
    pub async fn request_device_code(&self) -> Result<DeviceCode, OAuthClientError> {
        let client = self.device_client()?;

        let details: StandardDeviceAuthorizationResponse = client
            .exchange_device_code()
            .add_scopes(self.scopes())
            .request_async(&self.http)
            .await?;

        debug!(expires_in = ?details.expires_in(), "Received device authorization code");

        Ok(DeviceCode::from_details(details))
    }

    /// Poll the token endpoint until the user completes the device flow
    ///
    /// Honors the polling interval and `slow_down` responses from the server,
    /// and gives up once the device code expires.
    ///
    /// # Errors
    /// Returns error if the user denies access, the code expires, or the
    /// request fails
    pub async fn poll_device_token(&self, code: &DeviceCode) -> Result<TokenSet, OAuthClientError> {
        let client = self.device_client()?;

        let response: BasicTokenResponse = client
            .exchange_device_access_token(&code.details)
            .request_async(&self.http, tokio::time::sleep, None)
            .await?;

        info!("Device authorization completed");

        Ok(TokenSet::from_oauth(&response))
    }

    /// Exchange username and password for tokens
    ///
    /// # Errors
    /// Returns error if the credentials are rejected or the request fails
    pub async fn exchange_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        let client = self.token_client()?;
        let username = ResourceOwnerUsername::new(username.to_string());
        let password = ResourceOwnerPassword::new(password.to_string());

        let response: BasicTokenResponse = client
            .exchange_password(&username, &password)
            .add_scopes(self.scopes())
            .request_async(&self.http)
            .await?;

        info!("Password grant completed");

        Ok(TokenSet::from_oauth(&response))
    }

    /// Refresh access token using refresh token
    ///
    /// # Errors
    /// Returns error if:
    /// - No refresh token provided
    /// - Refresh fails
    /// - Token is invalid/revoked
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        if refresh_token.is_empty() {
            return Err(OAuthClientError::NoRefreshToken);
        }

        let client = self.token_client()?;
        let refresh_token = RefreshToken::new(refresh_token.to_string());

        let response: BasicTokenResponse =
            client.exchange_refresh_token(&refresh_token).request_async(&self.http).await?;

        Ok(TokenSet::from_oauth(&response))
    }
}

#[async_trait]
impl TokenRefresher for OAuthClient {
    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        Self::refresh_access_token(self, refresh_token).await
    }
}
