pub mod network;
pub mod outcome;
mod registry;

pub use network::{PingHostTool, WakeDeviceTool};
pub use outcome::{describe_error, Failure, ReachabilityResult, ToolOutcome, WakeResult, WakeStatus};
pub use registry::{json_schema_object, json_schema_string, Tool, ToolRegistry};

use pinet_client::PiNetClient;
use std::sync::Arc;

/// Registry with both PiNet tools wired to `client`.
pub fn pinet_registry(client: PiNetClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(PingHostTool::new(client.clone())));
    registry.register(Arc::new(WakeDeviceTool::new(client)));
    registry
}
