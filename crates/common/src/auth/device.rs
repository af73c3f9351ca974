//! Device authorization flow (RFC 8628)
//!
//! The user opens a verification page on any browser and enters a short code
//! while this process polls the token endpoint.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use super::client::{DeviceCode, OAuthClient};
use super::token_source::{AuthError, RefreshingTokenSource};
use super::traits::{Authenticator, TokenSource};
use super::types::OAuthConfig;
use crate::context::Context;

/// Shows the verification URI and user code to the user
pub trait DevicePrompt: Send + Sync {
    fn prompt(&self, code: &DeviceCode);
}

impl<F> DevicePrompt for F
where
    F: Fn(&DeviceCode) + Send + Sync,
{
    fn prompt(&self, code: &DeviceCode) {
        self(code);
    }
}

/// Prints the login instructions to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutPrompt;

impl DevicePrompt for StdoutPrompt {
    #[allow(clippy::print_stdout)]
    fn prompt(&self, code: &DeviceCode) {
        println!("Visit {} to log in.", code.login_uri());
        println!("Enter the code: {}", code.user_code);
    }
}

/// Authenticator that logs in through the device authorization flow
///
/// [`Authenticator::token_source`] blocks until the user has authorized the
/// device. The resulting token source renews through the refresh grant of the
/// same configuration.
#[derive(Clone)]
pub struct DeviceAuthenticator {
    client: OAuthClient,
    prompt: Arc<dyn DevicePrompt>,
}

impl DeviceAuthenticator {
    #[must_use]
    pub fn new(config: OAuthConfig) -> Self {
        Self::with_client(OAuthClient::new(config))
    }

    #[must_use]
    pub fn with_client(client: OAuthClient) -> Self {
        Self { client, prompt: Arc::new(StdoutPrompt) }
    }

    /// Replace the stdout prompt
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl DevicePrompt + 'static) -> Self {
        self.prompt = Arc::new(prompt);
        self
    }
}

impl Default for DeviceAuthenticator {
    fn default() -> Self {
        Self::new(OAuthConfig::tado())
    }
}

impl fmt::Debug for DeviceAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceAuthenticator").field("client", &self.client).finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for DeviceAuthenticator {
    #[instrument(skip_all, fields(client_id = %self.client.config().client_id))]
    async fn token_source(&self, ctx: &Context) -> Result<Arc<dyn TokenSource>, AuthError> {
        let code = ctx.run(self.client.request_device_code()).await??;

        info!(verification_uri = %code.verification_uri, "Waiting for device authorization");
        self.prompt.prompt(&code);

        let tokens = ctx.run(self.client.poll_device_token(&code)).await??;

        Ok(Arc::new(RefreshingTokenSource::new(self.client.clone(), tokens)))
    }
}
