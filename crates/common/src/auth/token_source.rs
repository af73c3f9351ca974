//! Token source with coordinated refresh
//!
//! Manages the cached token of one authenticated session:
//! - Fast path: concurrent readers share the cached token
//! - Refresh when expired (early by [`DEFAULT_EXPIRY_DELTA_SECONDS`])
//! - Refreshes are serialized; callers that waited on a refresh reuse its
//!   result instead of issuing their own

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use async_trait::async_trait;
use thiserror::Error;

use super::client::OAuthClientError;
use super::traits::{TokenRefresher, TokenSource};
use super::types::{TokenSet, DEFAULT_EXPIRY_DELTA_SECONDS};
use crate::context::ContextError;

/// Error type for token sources and authenticators
#[derive(Debug, Error)]
pub enum AuthError {
    /// OAuth exchange failed
    #[error("OAuth error: {0}")]
    OAuth(#[from] OAuthClientError),

    /// Token expired and there is no refresh token to renew it
    #[error("Token expired and no refresh token is available")]
    NoRefreshToken,

    /// The context finished while waiting for a token
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Invalid authenticator configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Token source that renews its token through a [`TokenRefresher`]
///
/// Created once per authenticated session and shared by every request of a
/// client. The refresh grant is used for renewal, never a new login.
pub struct RefreshingTokenSource<R: TokenRefresher> {
    refresher: R,
    current: RwLock<TokenSet>,
    refresh_lock: Mutex<()>,
    expiry_delta_seconds: i64,
}

impl<R: TokenRefresher> RefreshingTokenSource<R> {
    /// Create a token source seeded with `initial`
    #[must_use]
    pub fn new(refresher: R, initial: TokenSet) -> Self {
        Self::with_expiry_delta(refresher, initial, DEFAULT_EXPIRY_DELTA_SECONDS)
    }

    /// Like [`Self::new`], treating tokens as expired `delta_seconds` early
    #[must_use]
    pub fn with_expiry_delta(refresher: R, initial: TokenSet, delta_seconds: i64) -> Self {
        Self {
            refresher,
            current: RwLock::new(initial),
            refresh_lock: Mutex::new(()),
            expiry_delta_seconds: delta_seconds,
        }
    }

    /// Get current token set (without refresh)
    pub async fn current(&self) -> TokenSet {
        self.current.read().await.clone()
    }

    async fn cached_if_valid(&self) -> Option<TokenSet> {
        let tokens = self.current.read().await;
        tokens.is_valid(self.expiry_delta_seconds).then(|| tokens.clone())
    }

    /// Refresh access token using refresh token
    ///
    /// # Errors
    /// Returns error if refresh fails or no refresh token available
    async fn refresh(&self) -> Result<TokenSet, AuthError> {
        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while this one waited.
        if let Some(tokens) = self.cached_if_valid().await {
            debug!("Token refreshed by concurrent caller");
            return Ok(tokens);
        }

        let refresh_token = self
            .current
            .read()
            .await
            .refresh_token
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::NoRefreshToken)?;

        let mut renewed = match self.refresher.refresh_access_token(&refresh_token).await {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                return Err(e.into());
            }
        };

        // Servers may omit the refresh token when it is unchanged.
        if renewed.refresh_token.is_none() {
            renewed.refresh_token = Some(refresh_token);
        }

        *self.current.write().await = renewed.clone();

        info!(expires_in = renewed.expires_in, "Successfully refreshed access token");

        Ok(renewed)
    }
}

#[async_trait]
impl<R: TokenRefresher> TokenSource for RefreshingTokenSource<R> {
    async fn token(&self) -> Result<TokenSet, AuthError> {
        if let Some(tokens) = self.cached_if_valid().await {
            return Ok(tokens);
        }
        self.refresh().await
    }
}

impl<R: TokenRefresher + std::fmt::Debug> std::fmt::Debug for RefreshingTokenSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshingTokenSource")
            .field("refresher", &self.refresher)
            .field("expiry_delta_seconds", &self.expiry_delta_seconds)
            .finish_non_exhaustive()
    }
}

/// Token source that always hands out the same token
///
/// Used when a token is supplied without an OAuth configuration to renew it.
/// Once the token expires every call fails with [`AuthError::NoRefreshToken`].
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: TokenSet,
}

impl StaticTokenSource {
    #[must_use]
    pub const fn new(token: TokenSet) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Result<TokenSet, AuthError> {
        if self.token.is_valid(DEFAULT_EXPIRY_DELTA_SECONDS) {
            Ok(self.token.clone())
        } else {
            Err(AuthError::NoRefreshToken)
        }
    }
}
