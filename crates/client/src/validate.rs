//! Input validation for host identifiers and MAC addresses.
//!
//! Both checks run before any request leaves the process, so malformed input
//! never costs a round trip to the API.

use crate::error::{PiNetError, PiNetResult};
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

static MAC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}$|^(?:[0-9A-Fa-f]{2}-){5}[0-9A-Fa-f]{2}$")
        .expect("MAC pattern is valid")
});

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Validate an IP address or hostname, returning the trimmed identifier.
pub fn host(input: &str) -> PiNetResult<&str> {
    let host = input.trim();
    if host.is_empty() {
        return Err(PiNetError::Validation(
            "Invalid IP address format: host must not be empty".to_string(),
        ));
    }

    let valid = if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        host.parse::<Ipv4Addr>().is_ok()
    } else if host.contains(':') {
        host.parse::<Ipv6Addr>().is_ok()
    } else {
        is_hostname(host)
    };

    if valid {
        Ok(host)
    } else {
        Err(PiNetError::Validation(format!(
            "Invalid IP address format: '{}'",
            host
        )))
    }
}

/// Validate a colon- or dash-separated MAC address, returning it trimmed.
pub fn mac_address(input: &str) -> PiNetResult<&str> {
    let mac = input.trim();
    if MAC_PATTERN.is_match(mac) {
        Ok(mac)
    } else {
        Err(PiNetError::Validation(format!(
            "Invalid MAC address format: '{}'",
            mac
        )))
    }
}

fn is_hostname(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return false;
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ipv4() {
        assert_eq!(host("192.168.1.100").unwrap(), "192.168.1.100");
        assert_eq!(host("8.8.8.8").unwrap(), "8.8.8.8");
        assert_eq!(host("  10.0.0.1\n").unwrap(), "10.0.0.1");
    }

    #[test]
    fn test_rejects_out_of_range_ipv4() {
        let err = host("999.999.999.999").unwrap_err();
        assert!(matches!(err, PiNetError::Validation(_)));
        assert!(err.to_string().contains("Invalid IP address format"));

        assert!(host("192.168.1").is_err());
        assert!(host("1.2.3.4.5").is_err());
    }

    #[test]
    fn test_accepts_ipv6() {
        assert!(host("::1").is_ok());
        assert!(host("fe80::1ff:fe23:4567:890a").is_ok());
        assert!(host("fe80:::1").is_err());
    }

    #[test]
    fn test_accepts_hostnames() {
        assert!(host("google.com").is_ok());
        assert!(host("router.local").is_ok());
        assert!(host("nas-01").is_ok());
        assert!(host("example.com.").is_ok());
    }

    #[test]
    fn test_rejects_bad_hostnames() {
        assert!(host("-router.local").is_err());
        assert!(host("router-.local").is_err());
        assert!(host("under_score.local").is_err());
        assert!(host("a..b").is_err());
        assert!(host("rm -rf /").is_err());
        assert!(host(&"a".repeat(64)).is_err());
    }

    #[test]
    fn test_rejects_empty_host() {
        let err = host("   ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid IP address format: host must not be empty"
        );
    }

    #[test]
    fn test_accepts_mac_formats() {
        assert_eq!(mac_address("AA:BB:CC:DD:EE:FF").unwrap(), "AA:BB:CC:DD:EE:FF");
        assert_eq!(mac_address("aa-bb-cc-dd-ee-ff").unwrap(), "aa-bb-cc-dd-ee-ff");
        assert_eq!(mac_address(" 12:34:56:78:9A:BC ").unwrap(), "12:34:56:78:9A:BC");
    }

    #[test]
    fn test_rejects_bad_macs() {
        let err = mac_address("invalid-mac").unwrap_err();
        assert_eq!(err.to_string(), "Invalid MAC address format: 'invalid-mac'");

        assert!(mac_address("AA:BB:CC").is_err());
        assert!(mac_address("AA:BB:CC-DD:EE:FF").is_err());
        assert!(mac_address("GG:BB:CC:DD:EE:FF").is_err());
        assert!(mac_address("AABBCCDDEEFF").is_err());
        assert!(mac_address("").is_err());
    }
}
