//! Resource services
//!
//! Lightweight views over a [`Client`]: each call builds a path, dispatches it,
//! rejects error statuses through [`Response::error_for_status`] and decodes
//! the body.
//!
//! [`Response::error_for_status`]: crate::Response::error_for_status

pub mod home;
pub mod mobile_device;
pub mod user;

pub use home::HomeService;
pub use mobile_device::MobileDeviceService;
pub use user::UserService;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tado_common::Context;

use crate::api::request::NO_BODY;
use crate::api::{ApiError, Client, DecodeTarget};

impl Client {
    /// Users
    #[must_use]
    pub const fn user(&self) -> UserService<'_> {
        UserService::new(self)
    }

    /// Homes, presence and climate
    #[must_use]
    pub const fn home(&self) -> HomeService<'_> {
        HomeService::new(self)
    }

    /// Mobile devices registered with a home
    #[must_use]
    pub const fn mobile_device(&self) -> MobileDeviceService<'_> {
        MobileDeviceService::new(self)
    }

    /// `GET path`, decoded into `T` (`T::default()` for an empty body)
    pub(crate) async fn get_json<T>(&self, ctx: &Context, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default + Send,
    {
        self.call_json(ctx, Method::GET, path, NO_BODY).await
    }

    /// Call whose response body is decoded into `T`
    pub(crate) async fn call_json<T, B>(
        &self,
        ctx: &Context,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default + Send,
        B: Serialize + Sync + ?Sized,
    {
        let request = self.new_request(method, path, body, &[])?;
        let response = self.dispatch(Some(ctx), request).await?.error_for_status().await?;

        let mut value = T::default();
        ctx.run(response.decode(DecodeTarget::Json(&mut value))).await??;
        Ok(value)
    }

    /// Call that expects no response body
    pub(crate) async fn execute<B>(
        &self,
        ctx: &Context,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let request = self.new_request(method, path, body, &[])?;
        let response = self.dispatch(Some(ctx), request).await?.error_for_status().await?;

        ctx.run(response.decode(DecodeTarget::Discard)).await??;
        Ok(())
    }
}
