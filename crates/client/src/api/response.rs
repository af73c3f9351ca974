//! Response envelope and decoding

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;
use url::Url;

use super::errors::{ApiError, ApiErrorBody};

/// Value a JSON response body can be decoded into
///
/// Implemented for every `DeserializeOwned` type, so any `&mut T` can be used
/// as a [`DecodeTarget::Json`].
pub trait JsonTarget: Send {
    /// Replace `self` with the value decoded from `bytes`
    ///
    /// # Errors
    /// Returns the parse error if `bytes` is not valid JSON for the target
    fn decode_json(&mut self, bytes: &[u8]) -> Result<(), serde_json::Error>;
}

impl<T> JsonTarget for T
where
    T: DeserializeOwned + Send,
{
    fn decode_json(&mut self, bytes: &[u8]) -> Result<(), serde_json::Error> {
        *self = serde_json::from_slice(bytes)?;
        Ok(())
    }
}

/// Where a response body goes
pub enum DecodeTarget<'a> {
    /// Drop the body unread
    Discard,
    /// Copy the raw bytes
    Writer(&'a mut (dyn AsyncWrite + Unpin + Send)),
    /// Parse as JSON; an empty body leaves the target untouched
    Json(&'a mut dyn JsonTarget),
}

impl std::fmt::Debug for DecodeTarget<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Discard => "Discard",
            Self::Writer(_) => "Writer",
            Self::Json(_) => "Json",
        })
    }
}

/// Status line and headers of a response whose body has been consumed.
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: Url,
}

/// Vendor error body, empty when absent or not in the documented shape.
fn parse_error_body(bytes: &[u8]) -> ApiErrorBody {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return ApiErrorBody::default();
    }
    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        debug!(error = %e, "Error response body is not a vendor error document");
        ApiErrorBody::default()
    })
}

/// A dispatched API response
///
/// The body is released when the response is decoded or dropped.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) const fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        self.inner.url()
    }

    #[must_use]
    pub fn info(&self) -> ResponseInfo {
        ResponseInfo {
            status: self.status(),
            headers: self.headers().clone(),
            url: self.url().clone(),
        }
    }

    /// The underlying `reqwest` response
    #[must_use]
    pub fn into_inner(self) -> reqwest::Response {
        self.inner
    }

    /// Turn a 4xx/5xx response into [`ApiError::Api`]
    ///
    /// The vendor error body is parsed when present; its first title becomes
    /// the message, falling back to the status reason.
    ///
    /// # Errors
    /// Returns [`ApiError::Api`] for client and server error statuses
    pub async fn error_for_status(self) -> Result<Self, ApiError> {
        let status = self.status();
        if !status.is_client_error() && !status.is_server_error() {
            return Ok(self);
        }

        let url = self.url().clone();
        let bytes = match self.inner.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(%status, error = %e, "Failed to read error response body");
                Default::default()
            }
        };
        let body: ApiErrorBody = parse_error_body(&bytes);

        let message = body
            .errors
            .iter()
            .map(|detail| detail.title.as_str())
            .find(|title| !title.is_empty())
            .or_else(|| status.canonical_reason())
            .unwrap_or("unexpected status")
            .to_string();

        debug!(%status, %url, %message, "API returned error status");

        Err(ApiError::Api { status, url, message, errors: body.errors })
    }

    /// Consume the body into `target`
    ///
    /// # Errors
    /// - [`ApiError::Body`] if reading the body fails
    /// - [`ApiError::Copy`] if writing to a [`DecodeTarget::Writer`] fails
    /// - [`ApiError::Decode`] if a non-empty body is not valid JSON for the
    ///   target
    pub async fn decode(self, target: DecodeTarget<'_>) -> Result<ResponseInfo, ApiError> {
        let info = self.info();
        let mut inner = self.inner;

        match target {
            DecodeTarget::Discard => {}
            DecodeTarget::Writer(writer) => {
                while let Some(chunk) = inner.chunk().await.map_err(ApiError::Body)? {
                    writer.write_all(&chunk).await.map_err(ApiError::Copy)?;
                }
                writer.flush().await.map_err(ApiError::Copy)?;
            }
            DecodeTarget::Json(value) => {
                let bytes = inner.bytes().await.map_err(ApiError::Body)?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    debug!(status = %info.status, "Empty response body, nothing to decode");
                } else {
                    value.decode_json(&bytes).map_err(ApiError::Decode)?;
                }
            }
        }

        Ok(info)
    }
}
