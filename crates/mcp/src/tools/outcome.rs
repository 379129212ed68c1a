//! Normalized tool results.
//!
//! Whatever happens downstream, a tool answers with one of these shapes.
//! Errors never leave a tool as a JSON-RPC fault.

use crate::protocol::{CallToolResult, ToolContent};
use anyhow::{Context, Result};
use pinet_client::{ErrorKind, HostStatus, PiNetError, PingResult, WakeOnLanResult};
use serde::{Deserialize, Serialize};

/// `{"status": "error", "message": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub status: FailureStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStatus {
    Error,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: FailureStatus::Error,
            message: message.into(),
        }
    }
}

impl From<&PiNetError> for Failure {
    fn from(err: &PiNetError) -> Self {
        Self::new(describe_error(err))
    }
}

/// Render a client error as the message an agent sees.
///
/// Validation details pass through untouched; the other classes get a
/// fixed prefix.
pub fn describe_error(err: &PiNetError) -> String {
    match err.kind() {
        ErrorKind::Validation => err.to_string(),
        ErrorKind::Network => format!("PiNet API is unreachable: {}", err),
        ErrorKind::Authentication => format!("Authentication failed: {}", err),
        ErrorKind::Unexpected => format!("Unexpected error: {}", err),
    }
}

/// Result of `ping_host`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReachabilityResult {
    Reported {
        ip_address: String,
        status: HostStatus,
    },
    Failed(Failure),
}

impl From<PingResult> for ReachabilityResult {
    fn from(result: PingResult) -> Self {
        Self::Reported {
            ip_address: result.ip_address,
            status: result.status,
        }
    }
}

impl From<&PiNetError> for ReachabilityResult {
    fn from(err: &PiNetError) -> Self {
        Self::Failed(err.into())
    }
}

/// Result of `wake_device`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeResult {
    pub status: WakeStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WakeStatus {
    Success,
    Error,
}

impl From<WakeOnLanResult> for WakeResult {
    fn from(result: WakeOnLanResult) -> Self {
        Self {
            status: if result.success {
                WakeStatus::Success
            } else {
                WakeStatus::Error
            },
            message: result.message,
        }
    }
}

impl From<&PiNetError> for WakeResult {
    fn from(err: &PiNetError) -> Self {
        Self {
            status: WakeStatus::Error,
            message: describe_error(err),
        }
    }
}

/// A tool result that can be sent back over MCP.
pub trait ToolOutcome: Serialize {
    fn is_error(&self) -> bool;

    /// Encode as text content plus the same object as structured content.
    fn to_call_result(&self) -> Result<CallToolResult> {
        let structured = serde_json::to_value(self).context("Failed to encode tool result")?;
        Ok(CallToolResult {
            content: vec![ToolContent::text(structured.to_string())],
            structured_content: Some(structured),
            is_error: self.is_error().then_some(true),
        })
    }
}

impl ToolOutcome for ReachabilityResult {
    fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl ToolOutcome for WakeResult {
    fn is_error(&self) -> bool {
        self.status == WakeStatus::Error
    }
}
