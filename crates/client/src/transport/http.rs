//! HTTP transport layer for the PiNet client.

use crate::config::ClientConfig;
use crate::error::{PiNetError, PiNetResult};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> PiNetResult<Self> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| PiNetError::Config("Invalid API key format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("pinet-client/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL by appending path segments to the base URL.
    ///
    /// Each segment is percent-encoded, and any path prefix on the base URL
    /// is kept.
    fn build_url(&self, segments: &[&str]) -> PiNetResult<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PiNetError::Config("Base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request once and turn any failure into a classified error.
    async fn execute(&self, url: &Url, request_builder: RequestBuilder) -> PiNetResult<Response> {
        let response = request_builder
            .send()
            .await
            .map_err(|e| classify(e, url, self.config.timeout))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        debug!(url = %url, status, "API returned error status");
        Err(PiNetError::from_response(status, &body))
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> PiNetResult<T> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "GET request");

        let response = self.execute(&url, self.client.get(url.clone())).await?;
        self.read_json(&url, response).await
    }

    /// Execute a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> PiNetResult<T> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "POST request");

        let response = self
            .execute(&url, self.client.post(url.clone()).json(body))
            .await?;
        self.read_json(&url, response).await
    }

    /// Read the whole body, then decode it.
    ///
    /// The client timeout still runs while the body streams in, so transfer
    /// failures are classified like send failures.
    async fn read_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        response: Response,
    ) -> PiNetResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify(e, url, self.config.timeout))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Map a reqwest send failure onto the client's error taxonomy.
fn classify(err: reqwest::Error, url: &Url, timeout: std::time::Duration) -> PiNetError {
    if err.is_timeout() {
        PiNetError::Timeout(format!(
            "Request to {} timed out after {}s",
            origin(url),
            timeout.as_secs_f32()
        ))
    } else if err.is_connect() || err.is_request() {
        PiNetError::Network(format!("Failed to connect to {}: {}", origin(url), err))
    } else if err.is_body() || err.is_decode() {
        PiNetError::Network(format!(
            "Connection to {} failed while reading the response: {}",
            origin(url),
            err
        ))
    } else {
        PiNetError::Http(err)
    }
}

fn origin(url: &Url) -> String {
    url.origin().ascii_serialization()
}
