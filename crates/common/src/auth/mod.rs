//! OAuth 2.0 authentication for the tado° API
//!
//! Token exchange mechanics are delegated to the [`oauth2`] crate; this module
//! orchestrates them into token sources a client can share across tasks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Authenticator  │  Strategy chosen once per client (AuthMethod)
//! └────────┬────────┘
//!          │ login (device flow / password / supplied token)
//!          ▼
//! ┌─────────────────────────┐
//! │  RefreshingTokenSource  │  Cached token, coordinated refresh
//! └────────┬────────────────┘
//!          │ refresh grant
//!          ▼
//!     OAuthClient             (oauth2 over reqwest, no redirects)
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use tado_common::auth::{Authenticator, DeviceAuthenticator, OAuthConfig};
//! use tado_common::Context;
//!
//! # async fn login() -> Result<(), tado_common::auth::AuthError> {
//! let authenticator = DeviceAuthenticator::new(OAuthConfig::tado());
//!
//! // Prints the verification URI and blocks until the user has logged in
//! let source = authenticator.token_source(&Context::background()).await?;
//! let token = source.token().await?;
//! # let _ = token;
//! # Ok(())
//! # }
//! ```

pub mod authenticator;
pub mod client;
pub mod device;
pub mod token_source;
pub mod traits;
pub mod types;

pub use authenticator::{AuthMethod, PasswordAuthenticator, TokenAuthenticator};
pub use client::{DeviceCode, OAuthClient, OAuthClientError};
pub use device::{DeviceAuthenticator, DevicePrompt, StdoutPrompt};
pub use token_source::{AuthError, RefreshingTokenSource, StaticTokenSource};
pub use traits::{Authenticator, TokenRefresher, TokenSource};
pub use types::{
    OAuthConfig, TokenSet, DEFAULT_EXPIRY_DELTA_SECONDS, TADO_CLIENT_ID,
    TADO_DEVICE_AUTHORIZATION_URL, TADO_SCOPE, TADO_TOKEN_URL,
};
