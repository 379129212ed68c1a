//! Runs both tools through a set of scenarios against a real PiNet API.
//!
//! Reads the same settings as the server (PINET_API_URL, PINET_API_KEY, ...),
//! including a `.env` file in the working directory.
//!
//! Run with: cargo run -p pinet-mcp --example demo_tools

use anyhow::{Context, Result};
use clap::Parser;
use pinet_client::PiNetClient;
use pinet_mcp::tools::{PingHostTool, WakeDeviceTool};
use pinet_mcp::{Args, ServerConfig};

fn print_header(title: &str) {
    println!("\n{}", "=".repeat(70));
    println!("  {}", title);
    println!("{}", "=".repeat(70));
}

fn print_test(num: usize, description: &str, tool: &str, param: &str) {
    println!("\n[Test {}] {}", num, description);
    println!("Calling: {}({:?})", tool, param);
    println!("{}", "-".repeat(70));
}

fn print_result<T: serde::Serialize>(result: &T) -> Result<()> {
    println!("\nRESULT:\n{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_args(Args::parse()).context("Configuration error")?;
    let client = PiNetClient::builder()
        .base_url(&config.api_url)
        .api_key(&config.api_key)
        .timeout(config.api_timeout)
        .build()?;

    let ping = PingHostTool::new(client.clone());
    let wake = WakeDeviceTool::new(client);

    print_header("PINET MCP SERVER - TOOL DEMONSTRATION");
    println!("PiNet API: {}", config.api_url);

    let ping_cases = [
        ("Ping a well-known online host", "8.8.8.8"),
        ("Ping a local network device", "192.168.1.1"),
        ("Ping a likely offline host", "192.168.1.250"),
        ("Error handling - invalid IP format", "999.999.999.999"),
        ("Error handling - empty IP", ""),
    ];
    let wake_cases = [
        ("Send WoL packet to valid MAC", "AA:BB:CC:DD:EE:FF"),
        ("Send WoL packet (dash format)", "12-34-56-78-9A-BC"),
        ("Error handling - invalid MAC format", "invalid-mac"),
        ("Error handling - incomplete MAC", "AA:BB:CC"),
    ];

    let mut num = 0;

    print_header("TESTING: ping_host");
    for (description, host) in ping_cases {
        num += 1;
        print_test(num, description, PingHostTool::NAME, host);
        print_result(&ping.ping_host(host).await)?;
    }

    print_header("TESTING: wake_device");
    for (description, mac) in wake_cases {
        num += 1;
        print_test(num, description, WakeDeviceTool::NAME, mac);
        print_result(&wake.wake_device(mac).await)?;
    }

    print_header("DEMONSTRATION COMPLETE");
    Ok(())
}
