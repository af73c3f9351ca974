//! Shared building blocks for the tado° client crates.
//!
//! - [`context`]: cancellation/deadline context carried through every call
//! - [`auth`]: OAuth 2.0 configuration, token lifecycle and authenticators
//! - `testing` (feature `test-utils`): mock collaborators for tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod context;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use context::{Context, ContextError};
