//! # PiNet Client
//!
//! Rust client for the PiNet network diagnostics API: ping hosts and send
//! Wake-on-LAN packets through a PiNet box on the local network.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pinet_client::{PiNetClient, PiNetResult};
//!
//! #[tokio::main]
//! async fn main() -> PiNetResult<()> {
//!     let client = PiNetClient::builder()
//!         .base_url("http://192.168.1.50:5000")
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let ping = client.is_host_online("192.168.1.1").await?;
//!     println!("{} is {}", ping.ip_address, ping.status);
//!
//!     let wake = client.wake_host("AA:BB:CC:DD:EE:FF").await?;
//!     println!("{}", wake.message);
//!
//!     Ok(())
//! }
//! ```
//!
//! Every call makes at most one request. Input is validated before anything
//! is sent, and failures are reported as [`PiNetError`], which
//! [`PiNetError::kind`] sorts into validation, network, authentication and
//! unexpected failures.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod validate;

pub use api::{HealthCheck, HostStatus, PingResult, WakeOnLanResult};
pub use client::{PiNetClient, PiNetClientBuilder};
pub use config::{mask_secret, ClientConfig};
pub use error::{ErrorKind, PiNetError, PiNetResult};
