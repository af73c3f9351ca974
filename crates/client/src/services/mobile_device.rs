use reqwest::Method;
use tado_common::Context;
use tado_domain::{MobileDevice, MobileDeviceSettings};
use tracing::instrument;

use crate::api::request::NO_BODY;
use crate::api::{ApiError, Client};

/// Operations on the mobile devices of a home
#[derive(Debug, Clone, Copy)]
pub struct MobileDeviceService<'a> {
    client: &'a Client,
}

impl<'a> MobileDeviceService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// # Errors
    /// Returns [`ApiError`] if the request fails or the body cannot be decoded
    #[instrument(skip(self, ctx))]
    pub async fn list(&self, ctx: &Context, home_id: i64) -> Result<Vec<MobileDevice>, ApiError> {
        self.client.get_json(ctx, &format!("homes/{home_id}/mobileDevices")).await
    }

    /// # Errors
    /// Returns [`ApiError`] if the request fails or the body cannot be decoded
    #[instrument(skip(self, ctx))]
    pub async fn get(
        &self,
        ctx: &Context,
        home_id: i64,
        device_id: i64,
    ) -> Result<MobileDevice, ApiError> {
        self.client.get_json(ctx, &format!("homes/{home_id}/mobileDevices/{device_id}")).await
    }

    /// Unregister a device from the home
    ///
    /// # Errors
    /// Returns [`ApiError`] if the request fails or the API rejects it
    #[instrument(skip(self, ctx))]
    pub async fn delete(&self, ctx: &Context, home_id: i64, device_id: i64) -> Result<(), ApiError> {
        self.client
            .execute(
                ctx,
                Method::DELETE,
                &format!("homes/{home_id}/mobileDevices/{device_id}"),
                NO_BODY,
            )
            .await
    }

    /// # Errors
    /// Returns [`ApiError`] if the request fails or the body cannot be decoded
    #[instrument(skip(self, ctx))]
    pub async fn settings(
        &self,
        ctx: &Context,
        home_id: i64,
        device_id: i64,
    ) -> Result<MobileDeviceSettings, ApiError> {
        self.client
            .get_json(ctx, &format!("homes/{home_id}/mobileDevices/{device_id}/settings"))
            .await
    }

    /// Replace the settings of a device and return them as stored
    ///
    /// # Errors
    /// Returns [`ApiError`] if the request fails, the API rejects it, or the
    /// body cannot be decoded
    #[instrument(skip(self, ctx, settings))]
    pub async fn update_settings(
        &self,
        ctx: &Context,
        home_id: i64,
        device_id: i64,
        settings: &MobileDeviceSettings,
    ) -> Result<MobileDeviceSettings, ApiError> {
        self.client
            .call_json(
                ctx,
                Method::PUT,
                &format!("homes/{home_id}/mobileDevices/{device_id}/settings"),
                Some(settings),
            )
            .await
    }
}
