//! Main client for the PiNet API.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{PiNetError, PiNetResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Client for the PiNet network diagnostics API.
///
/// Cloning is cheap: clones share the connection pool and configuration.
#[derive(Clone)]
pub struct PiNetClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl PiNetClient {
    /// Create a new client builder.
    pub fn builder() -> PiNetClientBuilder {
        PiNetClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> PiNetResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the health API.
    pub fn health(&self) -> HealthApi<'_> {
        HealthApi::new(self)
    }

    /// Get the ping API.
    pub fn ping(&self) -> PingApi<'_> {
        PingApi::new(self)
    }

    /// Get the Wake-on-LAN API.
    pub fn wol(&self) -> WolApi<'_> {
        WolApi::new(self)
    }

    /// Check whether a host is online. Shorthand for `ping().check(host)`.
    pub async fn is_host_online(&self, host: &str) -> PiNetResult<PingResult> {
        self.ping().check(host).await
    }

    /// Send a Wake-on-LAN packet. Shorthand for `wol().wake(mac_address)`.
    pub async fn wake_host(&self, mac_address: &str) -> PiNetResult<WakeOnLanResult> {
        self.wol().wake(mac_address).await
    }
}

impl std::fmt::Debug for PiNetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PiNetClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for creating a PiNetClient.
pub struct PiNetClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl PiNetClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL of the PiNet API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> PiNetResult<PiNetClient> {
        let base_url_str = self
            .base_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| PiNetError::Config("base_url is required".to_string()))?;

        let base_url = Url::parse(base_url_str.trim())?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(PiNetError::Config(format!(
                "base_url must use http or https, got: {}",
                base_url.scheme()
            )));
        }

        let api_key = self
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| PiNetError::Config("api_key is required".to_string()))?;

        let config = ClientConfig {
            base_url,
            api_key,
            timeout: self.timeout,
        };

        PiNetClient::from_config(config)
    }
}

impl Default for PiNetClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
