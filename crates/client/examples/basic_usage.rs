//! Basic client usage example.
//!
//! Checks API health, pings a host and sends a Wake-on-LAN packet.
//!
//! Run with:
//! PINET_API_URL=http://192.168.1.50:5000 PINET_API_KEY=... cargo run --example basic_usage

use pinet_client::{PiNetClient, PiNetResult};
use std::time::Duration;

#[tokio::main]
async fn main() -> PiNetResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let base_url =
        std::env::var("PINET_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
    let api_key = std::env::var("PINET_API_KEY").unwrap_or_default();

    let client = PiNetClient::builder()
        .base_url(base_url)
        .api_key(api_key)
        .timeout(Duration::from_secs(10))
        .build()?;

    println!("Checking API health...");
    let health = client.health().check().await?;
    println!("PiNet status: {}", health.status);

    println!("\nPinging 192.168.1.1...");
    let ping = client.is_host_online("192.168.1.1").await?;
    println!("  {} is {}", ping.ip_address, ping.status);

    println!("\nWaking AA:BB:CC:DD:EE:FF...");
    match client.wake_host("AA:BB:CC:DD:EE:FF").await {
        Ok(result) if result.success => println!("  {}", result.message),
        Ok(result) => println!("  failed: {}", result.message),
        Err(e) => println!("  error ({:?}): {}", e.kind(), e),
    }

    Ok(())
}
