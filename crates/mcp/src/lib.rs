// MCP (Model Context Protocol) server for the PiNet API
// Exposes ping and Wake-on-LAN as tools that agent clients can call

pub mod config;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use config::{Args, ServerConfig, Transport};
pub use server::McpServer;
