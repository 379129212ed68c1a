//! Server configuration.
//!
//! Settings come from command-line flags, falling back to environment
//! variables (optionally loaded from a `.env` file by the binary).

use clap::{Parser, ValueEnum};
use pinet_client::mask_secret;
use std::time::Duration;

/// Command-line arguments, each backed by an environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "pinet-mcp")]
#[command(about = "MCP server exposing PiNet ping and Wake-on-LAN tools", long_about = None)]
#[command(version)]
pub struct Args {
    /// Base URL of the PiNet API, e.g. http://192.168.1.50:5000
    #[arg(long, env = "PINET_API_URL")]
    pub api_url: Option<String>,

    /// API key for the PiNet API
    #[arg(long, env = "PINET_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Timeout for each PiNet API request, in seconds
    #[arg(long, env = "PINET_API_TIMEOUT_SECS", default_value_t = 10)]
    pub api_timeout_secs: u64,

    /// Host to bind to
    #[arg(long, env = "MCP_SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "MCP_SERVER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Transport to serve MCP over
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value_t = Transport::Http)]
    pub transport: Transport,

    /// Log verbosity: DEBUG, INFO, WARNING, ERROR or CRITICAL
    #[arg(long, env = "LOG_LEVEL", default_value = "INFO")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// JSON-RPC over HTTP POST at /mcp
    Http,
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
}

/// Log verbosity, accepting the level names operators already use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a level name case-insensitively. Returns `None` if unknown.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "TRACE" | "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARN" | "WARNING" => Some(Self::Warn),
            "ERROR" | "CRITICAL" | "FATAL" => Some(Self::Error),
            _ => None,
        }
    }

    /// `tracing-subscriber` filter directive for this level.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}\nPlease set it in your .env file or environment.")]
    Missing(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Validated server configuration. Built once at startup, never mutated.
#[derive(Clone)]
pub struct ServerConfig {
    pub api_url: String,
    pub api_key: String,
    pub api_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub transport: Transport,
    pub log_level: LogLevel,
}

impl ServerConfig {
    /// Validate parsed arguments.
    ///
    /// Unknown log levels fall back to INFO rather than failing startup.
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let api_url = required(args.api_url, "PINET_API_URL")?
            .trim_end_matches('/')
            .to_string();
        let api_key = required(args.api_key, "PINET_API_KEY")?;

        if args.api_timeout_secs == 0 {
            return Err(ConfigError::Zero("PINET_API_TIMEOUT_SECS"));
        }

        Ok(Self {
            api_url,
            api_key,
            api_timeout: Duration::from_secs(args.api_timeout_secs),
            host: args.host,
            port: args.port,
            transport: args.transport,
            log_level: LogLevel::parse(&args.log_level).unwrap_or(LogLevel::Info),
        })
    }

    /// Address the HTTP transport binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &mask_secret(&self.api_key))
            .field("api_timeout", &self.api_timeout)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("transport", &self.transport)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}
