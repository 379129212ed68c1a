//! Endpoint groups of the PiNet API.

mod health;
mod ping;
mod wol;

pub use health::{HealthApi, HealthCheck};
pub use ping::{HostStatus, PingApi, PingResult};
pub use wol::{WakeOnLanResult, WolApi};
