//! Wake-on-LAN endpoint.

use crate::client::PiNetClient;
use crate::error::PiNetResult;
use crate::validate;
use serde::{Deserialize, Serialize};

/// Wake-on-LAN API.
pub struct WolApi<'a> {
    client: &'a PiNetClient,
}

impl<'a> WolApi<'a> {
    pub(crate) fn new(client: &'a PiNetClient) -> Self {
        Self { client }
    }

    /// Ask the PiNet API to broadcast a magic packet for `mac_address`.
    ///
    /// Success means the API accepted and sent the packet. Whether the
    /// device actually powers on is not observable from here.
    pub async fn wake(&self, mac_address: &str) -> PiNetResult<WakeOnLanResult> {
        let mac_address = validate::mac_address(mac_address)?;
        let request = WakeRequest { mac_address };

        let mut result: WakeOnLanResult = self.client.http.post(&["wol"], &request).await?;
        if result.message.is_empty() {
            result.message = if result.success {
                format!("Wake-on-LAN packet sent to {}", mac_address)
            } else {
                format!("Failed to send Wake-on-LAN packet to {}", mac_address)
            };
        }
        Ok(result)
    }
}

#[derive(Debug, Serialize)]
struct WakeRequest<'a> {
    mac_address: &'a str,
}

/// Wake-on-LAN response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeOnLanResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}
