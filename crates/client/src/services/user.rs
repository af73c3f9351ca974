use tado_common::Context;
use tado_domain::User;
use tracing::instrument;

use crate::api::{ApiError, Client};

/// Operations on the authenticated user
#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a Client,
}

impl<'a> UserService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// The user the client is logged in as, with their homes and devices
    ///
    /// # Errors
    /// Returns [`ApiError`] if the request fails or the body cannot be decoded
    #[instrument(skip_all)]
    pub async fn get(&self, ctx: &Context) -> Result<User, ApiError> {
        self.client.get_json(ctx, "me").await
    }
}
