//! Configuration loading
//!
//! Client settings from a TOML/JSON file and `TADO_*` environment variables.

pub mod loader;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tado_common::auth::{AuthMethod, OAuthConfig};

use crate::api::ClientBuilder;

pub use loader::{load, load_from_env, load_from_file, load_from_lookup, probe_config_paths};

/// Client settings; unset fields fall back to the library defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
    pub auth: AuthSettings,
}

/// OAuth settings; unset endpoints and client id use the tado° defaults
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_url: Option<String>,
    pub device_authorization_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("token_url", &self.token_url)
            .field("device_authorization_url", &self.device_authorization_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AuthSettings {
    /// Overlay `other` on top of `self`; fields set in `other` win
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            client_id: other.client_id.or(self.client_id),
            client_secret: other.client_secret.or(self.client_secret),
            token_url: other.token_url.or(self.token_url),
            device_authorization_url: other.device_authorization_url.or(self.device_authorization_url),
            username: other.username.or(self.username),
            password: other.password.or(self.password),
        }
    }

    /// The OAuth configuration these settings describe
    #[must_use]
    pub fn oauth_config(&self) -> OAuthConfig {
        let mut config = OAuthConfig::tado();
        if let Some(client_id) = &self.client_id {
            config.client_id.clone_from(client_id);
        }
        if let Some(token_url) = &self.token_url {
            config.token_url.clone_from(token_url);
        }
        if let Some(url) = &self.device_authorization_url {
            config.device_authorization_url = Some(url.clone());
        }
        config.client_secret.clone_from(&self.client_secret);
        config
    }

    /// Password grant when both username and password are set, device flow
    /// otherwise
    #[must_use]
    pub fn auth_method(&self) -> AuthMethod {
        let config = self.oauth_config();
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => AuthMethod::Password {
                config,
                username: username.clone(),
                password: password.clone(),
            },
            _ => AuthMethod::Device(config),
        }
    }
}

impl ClientConfig {
    /// Overlay `other` on top of `self`; fields set in `other` win
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            base_url: other.base_url.or(self.base_url),
            user_agent: other.user_agent.or(self.user_agent),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            auth: self.auth.merge(other.auth),
        }
    }

    /// A [`ClientBuilder`] carrying these settings
    #[must_use]
    pub fn into_builder(self) -> ClientBuilder {
        let mut builder = ClientBuilder::default().auth(self.auth.auth_method());
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder
    }
}
