//! Request construction
//!
//! Resolves a relative path against the base URL, encodes the optional JSON
//! body and sets the content negotiation headers.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Request};
use serde::Serialize;
use url::Url;

use super::errors::ApiError;

const APPLICATION_JSON: &str = "application/json";

/// Untyped empty body for [`crate::Client::new_request`].
pub const NO_BODY: Option<&()> = None;

/// Mutation applied to a request after the default headers are set
#[derive(Clone)]
pub enum RequestOption {
    /// Set (or replace) a header
    Header(HeaderName, HeaderValue),
    /// Arbitrary mutation
    Custom(Arc<dyn Fn(&mut Request) + Send + Sync>),
}

impl RequestOption {
    #[must_use]
    pub const fn header(name: HeaderName, value: HeaderValue) -> Self {
        Self::Header(name, value)
    }

    /// Header option from strings
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidOption`] if the name or value is not a valid
    /// header
    pub fn try_header(name: &str, value: &str) -> Result<Self, ApiError> {
        let name = HeaderName::try_from(name)
            .map_err(|e| ApiError::InvalidOption(format!("header name {name:?}: {e}")))?;
        let value = HeaderValue::try_from(value)
            .map_err(|e| ApiError::InvalidOption(format!("header value for {name}: {e}")))?;
        Ok(Self::Header(name, value))
    }

    pub fn custom(f: impl Fn(&mut Request) + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    fn apply(&self, request: &mut Request) {
        match self {
            Self::Header(name, value) => {
                request.headers_mut().insert(name.clone(), value.clone());
            }
            Self::Custom(f) => f(request),
        }
    }
}

impl fmt::Debug for RequestOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header(name, value) => f.debug_tuple("Header").field(name).field(value).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Resolve `path` against `base`.
///
/// One leading `/` is ignored so `"/foo"` and `"foo"` name the same resource.
/// Inputs that would leave the base URL (`"//host/x"`, absolute URLs,
/// `"../x"`) are rejected.
pub(crate) fn resolve(base: &Url, path: &str) -> Result<Url, ApiError> {
    if !base.path().ends_with('/') {
        return Err(ApiError::Config(format!(
            "BaseURL must have a trailing slash, but {base:?} does not",
            base = base.as_str()
        )));
    }

    let relative = path.strip_prefix('/').unwrap_or(path);
    let url = base.join(relative)?;

    if relative.starts_with('/')
        || url.origin() != base.origin()
        || !url.path().starts_with(base.path())
    {
        return Err(ApiError::PathEscapesBase { path: path.to_string() });
    }
    Ok(url)
}

pub(crate) fn build<M, B>(
    base: &Url,
    user_agent: Option<&HeaderValue>,
    method: M,
    path: &str,
    body: Option<&B>,
    options: &[RequestOption],
) -> Result<Request, ApiError>
where
    M: TryInto<Method>,
    M::Error: fmt::Display,
    B: Serialize + ?Sized,
{
    let url = resolve(base, path)?;

    let payload = body
        .map(|body| {
            let mut buf = serde_json::to_vec(body).map_err(ApiError::Encode)?;
            buf.push(b'\n');
            Ok::<_, ApiError>(buf)
        })
        .transpose()?;

    let method = method.try_into().map_err(|e| ApiError::InvalidMethod(e.to_string()))?;
    let mut request = Request::new(method, url);

    let headers = request.headers_mut();
    if payload.is_some() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    }
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    if let Some(user_agent) = user_agent {
        headers.insert(USER_AGENT, user_agent.clone());
    }

    if let Some(payload) = payload {
        *request.body_mut() = Some(payload.into());
    }

    for option in options {
        option.apply(&mut request);
    }

    Ok(request)
}
