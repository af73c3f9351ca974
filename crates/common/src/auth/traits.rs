//! Auth traits
//!
//! Seams between the OAuth exchange client, token sources and the HTTP client
//! that consumes them. Implementations must be safe to share across tasks.

use std::sync::Arc;

use async_trait::async_trait;

use super::client::OAuthClientError;
use super::token_source::AuthError;
use super::types::TokenSet;
use crate::context::Context;

/// Renews an access token from a refresh token
///
/// Implemented by [`super::OAuthClient`]; tests substitute a mock.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Exchange `refresh_token` for a new token set
    async fn refresh_access_token(&self, refresh_token: &str)
        -> Result<TokenSet, OAuthClientError>;
}

/// Supplies a currently valid bearer token, refreshing it when needed
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Current token, renewed first if it has expired
    async fn token(&self) -> Result<TokenSet, AuthError>;
}

/// Strategy that produces the token source of an authenticated session
///
/// Called once per client, the first time the client needs credentials.
/// Interactive strategies block until the user finishes or `ctx` is done.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Obtain a token source, performing any login the strategy requires
    async fn token_source(&self, ctx: &Context) -> Result<Arc<dyn TokenSource>, AuthError>;
}
