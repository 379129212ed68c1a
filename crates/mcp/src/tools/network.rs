// Network tools backed by the PiNet API

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::outcome::{ReachabilityResult, ToolOutcome, WakeResult, WakeStatus};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use pinet_client::PiNetClient;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

/// Tool to check whether a host answers ping
pub struct PingHostTool {
    client: PiNetClient,
}

impl PingHostTool {
    pub const NAME: &'static str = "ping_host";

    pub fn new(client: PiNetClient) -> Self {
        Self { client }
    }

    /// Ping `ip_address` through the PiNet API and normalize the outcome.
    pub async fn ping_host(&self, ip_address: &str) -> ReachabilityResult {
        log_call(Self::NAME, "ip_address", ip_address);
        debug!(tool = Self::NAME, "Calling PiNet API: is_host_online");

        match self.client.is_host_online(ip_address).await {
            Ok(result) => {
                let response = ReachabilityResult::from(result);
                log_response(Self::NAME, &response);
                response
            }
            Err(e) => {
                error!(tool = Self::NAME, kind = ?e.kind(), error = %e, "Tool call failed");
                ReachabilityResult::from(&e)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct PingHostArgs {
    ip_address: String,
}

#[async_trait::async_trait]
impl Tool for PingHostTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Check if a host is reachable on the network by pinging it. \
                Works with local network addresses (192.168.x.x, 10.x.x.x), internet \
                addresses (8.8.8.8) and hostnames (router.local). Returns \
                {\"ip_address\", \"status\": \"online\"|\"offline\"}, or \
                {\"status\": \"error\", \"message\"} if the check could not be made."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "ip_address": json_schema_string("The IP address or hostname to ping, e.g. \"192.168.1.100\" or \"router.local\"")
                }),
                vec!["ip_address"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: PingHostArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for ping_host")?;

        self.ping_host(&args.ip_address).await.to_call_result()
    }
}

/// Tool to send a Wake-on-LAN magic packet
pub struct WakeDeviceTool {
    client: PiNetClient,
}

impl WakeDeviceTool {
    pub const NAME: &'static str = "wake_device";

    pub fn new(client: PiNetClient) -> Self {
        Self { client }
    }

    /// Ask the PiNet API to wake `mac_address` and normalize the outcome.
    pub async fn wake_device(&self, mac_address: &str) -> WakeResult {
        log_call(Self::NAME, "mac_address", mac_address);
        debug!(tool = Self::NAME, "Calling PiNet API: wake_host");

        match self.client.wake_host(mac_address).await {
            Ok(result) => {
                let response = WakeResult::from(result);
                if response.status == WakeStatus::Success {
                    log_response(Self::NAME, &response);
                } else {
                    warn!(tool = Self::NAME, detail = %response.message, "PiNet API reported failure");
                }
                response
            }
            Err(e) => {
                error!(tool = Self::NAME, kind = ?e.kind(), error = %e, "Tool call failed");
                WakeResult::from(&e)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct WakeDeviceArgs {
    mac_address: String,
}

#[async_trait::async_trait]
impl Tool for WakeDeviceTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Send a Wake-on-LAN magic packet to wake up a sleeping network device. \
                The device must have Wake-on-LAN enabled, be connected by Ethernet and sit \
                on the same subnet as the PiNet box. Success means the packet was sent, not \
                that the device has powered on."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "mac_address": json_schema_string("MAC address of the device, colon- or dash-separated, e.g. \"AA:BB:CC:DD:EE:FF\" or \"AA-BB-CC-DD-EE-FF\"")
                }),
                vec!["mac_address"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: WakeDeviceArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for wake_device")?;

        self.wake_device(&args.mac_address).await.to_call_result()
    }
}

fn log_call(tool: &str, parameter: &str, value: &str) {
    info!(
        tool,
        parameter,
        value,
        length = value.len(),
        repr = ?value,
        "Tool call received"
    );
}

fn log_response<T: serde::Serialize>(tool: &str, response: &T) {
    match serde_json::to_string(response) {
        Ok(json) => info!(tool, response = %json, "Tool call completed"),
        Err(e) => warn!(tool, error = %e, "Tool call completed, response not printable"),
    }
}
