//! Small helpers shared by the host binary and its handlers

use crate::Result;
use std::net::SocketAddr;

/// Hide all but the first few characters of a secret for logging
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

/// Format an uptime in seconds as `1d 02:03:04` or `02:03:04`
#[must_use]
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{days}d {hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    }
}

/// Parse the bind address from host and port
///
/// # Errors
///
/// Returns a configuration error if the host is not an IP address.
pub fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr> {
    let host = host.trim().trim_start_matches('[').trim_end_matches(']');
    let ip = if host.eq_ignore_ascii_case("localhost") {
        "127.0.0.1"
    } else {
        host
    };
    ip.parse::<std::net::IpAddr>()
        .map(|ip| SocketAddr::new(ip, port))
        .map_err(|e| crate::Error::Configuration {
            message: format!("invalid server host '{host}': {e}"),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "****")]
    #[case("abcd", "****")]
    #[case("abcdef123", "abcd****")]
    fn test_mask_secret(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(mask_secret(input), expected);
    }

    #[rstest]
    #[case(0, "00:00:00")]
    #[case(59, "00:00:59")]
    #[case(3_723, "01:02:03")]
    #[case(93_784, "1d 02:03:04")]
    fn test_format_uptime(#[case] seconds: u64, #[case] expected: &str) {
        assert_eq!(format_uptime(seconds), expected);
    }

    #[rstest]
    #[case("0.0.0.0", 8080, "0.0.0.0:8080")]
    #[case("localhost", 3000, "127.0.0.1:3000")]
    #[case("[::1]", 80, "[::1]:80")]
    fn test_parse_socket_addr(#[case] host: &str, #[case] port: u16, #[case] expected: &str) {
        assert_eq!(parse_socket_addr(host, port).unwrap().to_string(), expected);
    }

    #[test]
    fn test_parse_socket_addr_rejects_names() {
        assert!(parse_socket_addr("admin.example.com", 80).is_err());
    }

    proptest! {
        #[test]
        fn masked_secret_never_leaks_the_tail(secret in "[a-zA-Z0-9]{5,64}") {
            let masked = mask_secret(&secret);
            prop_assert!(masked.ends_with("****"));
            prop_assert_eq!(masked.len(), 8);
        }
    }
}
