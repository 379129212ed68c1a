//! Reachability endpoint.

use crate::client::PiNetClient;
use crate::error::PiNetResult;
use crate::validate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ping API for checking whether a host answers on the network.
pub struct PingApi<'a> {
    client: &'a PiNetClient,
}

impl<'a> PingApi<'a> {
    pub(crate) fn new(client: &'a PiNetClient) -> Self {
        Self { client }
    }

    /// Ping an IP address or hostname from the PiNet host.
    ///
    /// The identifier is validated locally first; a malformed one yields
    /// [`PiNetError::Validation`](crate::PiNetError::Validation) without any
    /// request being made.
    pub async fn check(&self, host: &str) -> PiNetResult<PingResult> {
        let host = validate::host(host)?;
        self.client.http.get(&["ping", host]).await
    }
}

/// Reachability of a host as observed by the PiNet API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostStatus {
    Online,
    Offline,
}

impl fmt::Display for HostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Ping response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResult {
    pub ip_address: String,
    pub status: HostStatus,
}

impl PingResult {
    pub fn is_online(&self) -> bool {
        self.status == HostStatus::Online
    }
}
