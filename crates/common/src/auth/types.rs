//! OAuth 2.0 types and structures
//!
//! Defines the token set cached by token sources and the configuration of the
//! authorization server the authenticators talk to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client ID registered by tado° for the device authorization flow.
pub const TADO_CLIENT_ID: &str = "1bb50063-6b0c-4d11-bd99-387f4a91cc46";

/// tado° device authorization endpoint.
pub const TADO_DEVICE_AUTHORIZATION_URL: &str = "https://login.tado.com/oauth2/device_authorize";

/// tado° token endpoint (device, password and refresh grants).
pub const TADO_TOKEN_URL: &str = "https://login.tado.com/oauth2/token";

/// Scope requested so the server issues a refresh token.
pub const TADO_SCOPE: &str = "offline-access";

/// Seconds before `expires_at` at which a token is already treated as expired.
pub const DEFAULT_EXPIRY_DELTA_SECONDS: i64 = 10;

/// OAuth 2.0 access and refresh tokens with metadata
///
/// - Optional refresh token (password and device grants normally issue one)
/// - Both expires_in (duration) and expires_at (timestamp) for flexibility
/// - Scope tracking for granted permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    /// Bearer token sent with every API request
    pub access_token: String,

    /// Refresh token for obtaining new access tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Token type as reported by the server (normally "Bearer")
    pub token_type: String,

    /// Access token lifetime in seconds (0 when the server did not say)
    pub expires_in: i64,

    /// Absolute expiration timestamp (UTC)
    /// `None` means the token never expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Granted scopes (space-separated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TokenSet {
    /// Create a new `TokenSet` with calculated expiration time
    ///
    /// The `expires_at` timestamp is calculated from `expires_in`; a
    /// non-positive lifetime leaves the token without expiry.
    #[must_use]
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        expires_in: i64,
        scope: Option<String>,
    ) -> Self {
        let expires_at = if expires_in > 0 {
            Some(Utc::now() + chrono::Duration::seconds(expires_in))
        } else {
            None
        };

        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            expires_at,
            scope,
        }
    }

    /// Create a `TokenSet` that expires at a fixed point in time
    #[must_use]
    pub fn with_expiry(
        access_token: String,
        refresh_token: Option<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: (expires_at - Utc::now()).num_seconds().max(0),
            expires_at: Some(expires_at),
            scope: None,
        }
    }

    pub(crate) fn from_oauth<T: oauth2::TokenResponse>(response: &T) -> Self {
        let expires_in = response
            .expires_in()
            .map_or(0, |lifetime| i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX));
        let scope = response.scopes().map(|scopes| {
            scopes.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(" ")
        });

        Self::new(
            response.access_token().secret().clone(),
            response.refresh_token().map(|token| token.secret().clone()),
            expires_in,
            scope,
        )
    }

    /// Check if the access token is expired or will expire within the given
    /// threshold
    ///
    /// # Returns
    /// `true` if the token is expired or will expire within the threshold,
    /// `false` if it's still valid beyond the threshold or if no expiry is set
    #[must_use]
    pub fn is_expired(&self, threshold_seconds: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let threshold = chrono::Duration::seconds(threshold_seconds);
                Utc::now() + threshold >= expires_at
            }
            None => false,
        }
    }

    /// A token is usable when it carries an access token that has not expired
    #[must_use]
    pub fn is_valid(&self, threshold_seconds: i64) -> bool {
        !self.access_token.is_empty() && !self.is_expired(threshold_seconds)
    }

    /// Get seconds until token expiration
    ///
    /// # Returns
    /// `Some(seconds)` if expiry is set, `None` if no expiry timestamp exists
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|expires_at| (expires_at - Utc::now()).num_seconds())
    }

    /// Value for the `Authorization` header, e.g. `Bearer abc`
    ///
    /// Servers commonly report the type in lower case; it is normalized to the
    /// canonical `Bearer` spelling. An empty type defaults to `Bearer`.
    #[must_use]
    pub fn authorization_value(&self) -> String {
        let token_type = if self.token_type.is_empty()
            || self.token_type.eq_ignore_ascii_case("bearer")
        {
            "Bearer"
        } else {
            self.token_type.as_str()
        };
        format!("{token_type} {}", self.access_token)
    }
}

/// OAuth configuration for the authorization server
///
/// The device authorization URL is only needed by the device flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    /// OAuth client ID
    pub client_id: String,

    /// Client secret, sent with token requests when present
    pub client_secret: Option<String>,

    /// Device authorization endpoint (RFC 8628)
    pub device_authorization_url: Option<String>,

    /// Token endpoint (device, password and refresh grants)
    pub token_url: String,

    /// OAuth scopes to request
    pub scopes: Vec<String>,
}

impl OAuthConfig {
    /// Create a new OAuth configuration
    #[must_use]
    pub fn new(client_id: String, token_url: String, scopes: Vec<String>) -> Self {
        Self {
            client_id,
            client_secret: None,
            device_authorization_url: None,
            token_url,
            scopes,
        }
    }

    /// The configuration tado° publishes for its device authorization flow
    #[must_use]
    pub fn tado() -> Self {
        Self::new(TADO_CLIENT_ID.to_string(), TADO_TOKEN_URL.to_string(), vec![
            TADO_SCOPE.to_string()
        ])
        .with_device_authorization_url(TADO_DEVICE_AUTHORIZATION_URL.to_string())
    }

    #[must_use]
    pub fn with_client_secret(mut self, secret: String) -> Self {
        self.client_secret = Some(secret);
        self
    }

    #[must_use]
    pub fn with_device_authorization_url(mut self, url: String) -> Self {
        self.device_authorization_url = Some(url);
        self
    }

    /// Get scopes as space-separated string
    #[must_use]
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self::tado()
    }
}
