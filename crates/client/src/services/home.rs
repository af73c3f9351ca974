use reqwest::Method;
use tado_common::Context;
use tado_domain::{
    AirComfort, FlowTemperatureOptimization, HeatingSystem, Home, HomeState, Presence,
    PresenceLock, Weather,
};
use tracing::instrument;

use crate::api::{ApiError, Client};

/// Operations on a home
///
/// Every call returns [`ApiError`] if the request fails, the API answers with
/// an error status, or the body cannot be decoded.
#[derive(Debug, Clone, Copy)]
pub struct HomeService<'a> {
    client: &'a Client,
}

impl<'a> HomeService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    #[instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &Context, home_id: i64) -> Result<Home, ApiError> {
        self.client.get_json(ctx, &format!("homes/{home_id}")).await
    }

    /// Air freshness and per-room comfort
    #[instrument(skip(self, ctx))]
    pub async fn air_comfort(&self, ctx: &Context, home_id: i64) -> Result<AirComfort, ApiError> {
        self.client.get_json(ctx, &format!("homes/{home_id}/airComfort")).await
    }

    #[instrument(skip(self, ctx))]
    pub async fn heating_system(
        &self,
        ctx: &Context,
        home_id: i64,
    ) -> Result<HeatingSystem, ApiError> {
        self.client.get_json(ctx, &format!("homes/{home_id}/heatingSystem")).await
    }

    #[instrument(skip(self, ctx))]
    pub async fn flow_temperature_optimization(
        &self,
        ctx: &Context,
        home_id: i64,
    ) -> Result<FlowTemperatureOptimization, ApiError> {
        self.client.get_json(ctx, &format!("homes/{home_id}/flowTemperatureOptimization")).await
    }

    /// Outside temperature, solar intensity and weather state at the home
    #[instrument(skip(self, ctx))]
    pub async fn weather(&self, ctx: &Context, home_id: i64) -> Result<Weather, ApiError> {
        self.client.get_json(ctx, &format!("homes/{home_id}/weather")).await
    }

    /// Current presence and whether it is locked
    #[instrument(skip(self, ctx))]
    pub async fn state(&self, ctx: &Context, home_id: i64) -> Result<HomeState, ApiError> {
        self.client.get_json(ctx, &format!("homes/{home_id}/state")).await
    }

    /// Lock the home presence to `presence`, overriding geofencing
    #[instrument(skip(self, ctx))]
    pub async fn set_presence(
        &self,
        ctx: &Context,
        home_id: i64,
        presence: Presence,
    ) -> Result<(), ApiError> {
        let body = PresenceLock { home_presence: presence };
        self.client
            .execute(ctx, Method::PUT, &format!("homes/{home_id}/presenceLock"), Some(&body))
            .await
    }
}
