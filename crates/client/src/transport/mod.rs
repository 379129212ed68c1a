//! Transport layer for the PiNet client.

pub mod http;

pub use http::HttpTransport;
