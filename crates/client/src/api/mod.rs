//! HTTP plumbing: request builder, dispatcher and response decoder

pub mod client;
pub mod errors;
pub mod request;
pub mod response;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use errors::{ApiError, ApiErrorBody, ApiErrorCategory, ApiErrorDetail};
pub use request::{RequestOption, NO_BODY};
pub use response::{DecodeTarget, JsonTarget, Response, ResponseInfo};
