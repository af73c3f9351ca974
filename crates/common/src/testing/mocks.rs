//! Mock implementations of the auth traits

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::auth::{
    AuthError, Authenticator, OAuthClientError, StaticTokenSource, TokenRefresher, TokenSet,
    TokenSource,
};
use crate::context::Context;

/// Token refresher returning a configurable response
///
/// Clones share state, so a test can keep a handle after moving one into a
/// token source.
#[derive(Debug, Clone, Default)]
pub struct MockTokenRefresher {
    calls: Arc<AtomicUsize>,
    response: Arc<Mutex<Option<TokenSet>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockTokenRefresher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the token set returned by `refresh_access_token`.
    pub fn set_refresh_response(&self, tokens: TokenSet) {
        *self.response.lock().unwrap_or_else(PoisonError::into_inner) = Some(tokens);
    }

    /// Force the refresh call to fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of refresh calls so far.
    #[must_use]
    pub fn refresh_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenRefresher for MockTokenRefresher {
    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(OAuthClientError::Server("invalid_grant".to_string()));
        }

        let configured = self.response.lock().unwrap_or_else(PoisonError::into_inner).clone();
        Ok(configured.unwrap_or_else(|| {
            TokenSet::new(
                format!("mock_access_token_{call}"),
                Some(refresh_token.to_string()),
                3600,
                None,
            )
        }))
    }
}

/// Authenticator that hands out a fixed token without any network access
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    token: TokenSet,
    logins: Arc<AtomicUsize>,
    should_fail: Arc<AtomicBool>,
}

impl MockAuthenticator {
    #[must_use]
    pub fn new(access_token: &str) -> Self {
        Self {
            token: TokenSet::new(access_token.to_string(), None, 3600, None),
            logins: Arc::new(AtomicUsize::new(0)),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make subsequent logins fail with a configuration error.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of `token_source` calls so far.
    #[must_use]
    pub fn login_count(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn token_source(&self, ctx: &Context) -> Result<Arc<dyn TokenSource>, AuthError> {
        self.logins.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = ctx.err() {
            return Err(err.into());
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(AuthError::Config("mock login failure".to_string()));
        }

        Ok(Arc::new(StaticTokenSource::new(self.token.clone())))
    }
}
