//! Health API endpoint.

use crate::client::PiNetClient;
use crate::error::PiNetResult;
use serde::{Deserialize, Serialize};

/// Health API for checking that the PiNet API is up.
pub struct HealthApi<'a> {
    client: &'a PiNetClient,
}

impl<'a> HealthApi<'a> {
    pub(crate) fn new(client: &'a PiNetClient) -> Self {
        Self { client }
    }

    /// Check basic health status.
    pub async fn check(&self) -> PiNetResult<HealthCheck> {
        self.client.http.get(&["health"]).await
    }
}

/// Basic health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
}
