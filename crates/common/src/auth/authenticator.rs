//! Non-interactive authenticators and strategy selection

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::client::OAuthClient;
use super::device::DeviceAuthenticator;
use super::token_source::{AuthError, RefreshingTokenSource, StaticTokenSource};
use super::traits::{Authenticator, TokenSource};
use super::types::{OAuthConfig, TokenSet};
use crate::context::Context;

/// Authenticator using the resource owner password credentials grant
#[derive(Clone)]
pub struct PasswordAuthenticator {
    client: OAuthClient,
    username: String,
    password: String,
}

impl PasswordAuthenticator {
    #[must_use]
    pub fn new(config: OAuthConfig, username: String, password: String) -> Self {
        Self::with_client(OAuthClient::new(config), username, password)
    }

    #[must_use]
    pub const fn with_client(client: OAuthClient, username: String, password: String) -> Self {
        Self { client, username, password }
    }
}

impl fmt::Debug for PasswordAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordAuthenticator")
            .field("client", &self.client)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Authenticator for PasswordAuthenticator {
    #[instrument(skip_all, fields(username = %self.username))]
    async fn token_source(&self, ctx: &Context) -> Result<Arc<dyn TokenSource>, AuthError> {
        if self.username.is_empty() {
            return Err(AuthError::Config("username must not be empty".to_string()));
        }

        let tokens =
            ctx.run(self.client.exchange_password(&self.username, &self.password)).await??;

        info!("Authenticated with password credentials");

        Ok(Arc::new(RefreshingTokenSource::new(self.client.clone(), tokens)))
    }
}

/// Authenticator wrapping a token obtained elsewhere
///
/// No network call is made until the token needs renewing. Without an OAuth
/// configuration the token is used as-is until it expires.
#[derive(Clone)]
pub struct TokenAuthenticator {
    client: Option<OAuthClient>,
    token: TokenSet,
}

impl TokenAuthenticator {
    #[must_use]
    pub fn new(config: Option<OAuthConfig>, token: TokenSet) -> Self {
        Self { client: config.map(OAuthClient::new), token }
    }

    #[must_use]
    pub const fn with_client(client: OAuthClient, token: TokenSet) -> Self {
        Self { client: Some(client), token }
    }
}

impl fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("client", &self.client)
            .field("expires_at", &self.token.expires_at)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for TokenAuthenticator {
    async fn token_source(&self, _ctx: &Context) -> Result<Arc<dyn TokenSource>, AuthError> {
        match &self.client {
            Some(client) => {
                Ok(Arc::new(RefreshingTokenSource::new(client.clone(), self.token.clone())))
            }
            None => {
                debug!("No OAuth configuration, token will not be refreshed");
                Ok(Arc::new(StaticTokenSource::new(self.token.clone())))
            }
        }
    }
}

/// Authentication strategy chosen when a client is built
#[derive(Clone)]
pub enum AuthMethod {
    /// Interactive device authorization flow
    Device(OAuthConfig),

    /// Username and password exchanged for a token
    Password {
        config: OAuthConfig,
        username: String,
        password: String,
    },

    /// Previously obtained token, renewed through `config` when present
    Token {
        config: Option<OAuthConfig>,
        token: TokenSet,
    },

    /// Caller-provided authenticator
    Custom(Arc<dyn Authenticator>),
}

impl AuthMethod {
    #[must_use]
    pub fn into_authenticator(self) -> Arc<dyn Authenticator> {
        match self {
            Self::Device(config) => Arc::new(DeviceAuthenticator::new(config)),
            Self::Password { config, username, password } => {
                Arc::new(PasswordAuthenticator::new(config, username, password))
            }
            Self::Token { config, token } => Arc::new(TokenAuthenticator::new(config, token)),
            Self::Custom(authenticator) => authenticator,
        }
    }
}

impl Default for AuthMethod {
    fn default() -> Self {
        Self::Device(OAuthConfig::tado())
    }
}

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(config) => f.debug_tuple("Device").field(config).finish(),
            Self::Password { config, username, .. } => f
                .debug_struct("Password")
                .field("config", config)
                .field("username", username)
                .finish_non_exhaustive(),
            Self::Token { config, .. } => {
                f.debug_struct("Token").field("config", config).finish_non_exhaustive()
            }
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}
