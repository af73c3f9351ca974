//! API-specific error types
//!
//! One variant family per failure kind, classified by [`ApiError::category`].

use reqwest::StatusCode;
use serde::Deserialize;
use tado_common::auth::AuthError;
use tado_common::ContextError;
use thiserror::Error;
use url::Url;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCategory {
    /// Client misconfiguration, detected before any I/O
    Config,
    /// Request could not be built (path, method or body), before any I/O
    Request,
    /// Missing, cancelled or expired context
    Context,
    /// Network, DNS or TLS failure
    Transport,
    /// Response body could not be decoded or copied
    Decode,
    /// Credentials could not be obtained
    Auth,
    /// The API answered with an error status
    Api,
}

/// One entry of the vendor error body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiErrorDetail {
    pub code: String,
    pub title: String,
}

/// Error body returned by the API, e.g.
/// `{"errors":[{"code":"unauthorized","title":"..."}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub errors: Vec<ApiErrorDetail>,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Path {path:?} resolves outside the base URL")]
    PathEscapesBase { path: String },

    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid request option: {0}")]
    InvalidOption(String),

    #[error("context must not be nil")]
    MissingContext,

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to copy response body: {0}")]
    Copy(#[source] std::io::Error),

    #[error("Authentication failed: {0}")]
    Auth(#[source] AuthError),

    #[error("{status} {url}: {message}")]
    Api { status: StatusCode, url: Url, message: String, errors: Vec<ApiErrorDetail> },
}

impl ApiError {
    /// Get the error category for this error
    #[must_use]
    pub const fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Config(_) => ApiErrorCategory::Config,
            Self::InvalidUrl(_)
            | Self::PathEscapesBase { .. }
            | Self::InvalidMethod(_)
            | Self::Encode(_)
            | Self::InvalidOption(_) => ApiErrorCategory::Request,
            Self::MissingContext | Self::Context(_) => ApiErrorCategory::Context,
            Self::Transport(_) => ApiErrorCategory::Transport,
            Self::Body(_) | Self::Decode(_) | Self::Copy(_) => ApiErrorCategory::Decode,
            Self::Auth(_) => ApiErrorCategory::Auth,
            Self::Api { .. } => ApiErrorCategory::Api,
        }
    }

    /// HTTP status of an [`ApiError::Api`] error
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Context(ctx) => Self::Context(ctx),
            other => Self::Auth(other),
        }
    }
}
