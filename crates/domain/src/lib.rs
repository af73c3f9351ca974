//! # tado° Domain
//!
//! Resource types returned and accepted by the tado° REST API.
//!
//! This crate contains:
//! - User and home summaries (`User`, `BareHome`)
//! - Home details, state, presence and climate readings
//! - Mobile devices and their settings
//!
//! ## Architecture
//! - No dependencies on other tado crates
//! - Only serde/chrono, no I/O
//! - All structs tolerate missing fields (`#[serde(default)]`) so that an
//!   empty or partial response body decodes into the default value

pub mod types;

// Re-export commonly used items
pub use types::*;
