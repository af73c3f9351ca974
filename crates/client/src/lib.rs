//! # tado
//!
//! Typed client for the tado° home-automation REST API.
//!
//! - [`api`]: request builder, transport dispatcher and response decoder
//! - [`services`]: user, home and mobile-device operations
//! - [`config`]: file and environment configuration
//!
//! Authentication is pluggable through [`auth::AuthMethod`]; the default is
//! the interactive device authorization flow.
//!
//! ```no_run
//! use tado::{Client, Context, Presence};
//!
//! # async fn run() -> Result<(), tado::ApiError> {
//! let client = Client::new()?;
//! let ctx = Context::background();
//!
//! let me = client.user().get(&ctx).await?;
//! for home in &me.homes {
//!     client.home().set_presence(&ctx, home.id, Presence::Away).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod services;

pub use api::{
    ApiError, ApiErrorCategory, Client, ClientBuilder, DecodeTarget, RequestOption, Response,
    ResponseInfo, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, NO_BODY,
};
pub use config::ClientConfig;
pub use tado_common::auth;
pub use tado_common::{Context, ContextError};
pub use tado_domain::*;
