//! Testing utilities
//!
//! Mock collaborators for the auth seams, available with the `test-utils`
//! feature:
//! - [`MockTokenRefresher`]: scripted refresh responses with a call counter
//! - [`MockAuthenticator`]: hands out a fixed token and counts logins

pub mod mocks;

pub use mocks::{MockAuthenticator, MockTokenRefresher};
