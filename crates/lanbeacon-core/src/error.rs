//! Error types for lanbeacon core.

use std::net::Ipv4Addr;

use thiserror::Error;

/// Errors from decoding an announcement datagram.
///
/// These are per-datagram errors: the discoverer logs them and keeps
/// listening.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed announcement: {0}")]
    MalformedMessage(String),

    #[error("invalid port number: {0}")]
    InvalidPort(String),
}

/// Errors constructing an announcer.
///
/// Send failures at run time are not in here: the announcer logs them and
/// retries on the next tick.
#[derive(Debug, Error)]
pub enum AnnounceError {
    #[error("failed to open announce socket: {0}")]
    Bind(#[source] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Errors constructing a discoverer. All of these are fatal and surface
/// synchronously from the constructor.
#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("failed to bind discovery socket: {0}")]
    Bind(#[source] std::io::Error),

    #[error("failed to join multicast group {group}: {source}")]
    JoinGroup {
        group: Ipv4Addr,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidPort("notaport".to_string());
        assert_eq!(format!("{}", err), "invalid port number: notaport");
    }

    #[test]
    fn test_join_group_error_display() {
        let err = DiscoverError::JoinGroup {
            group: Ipv4Addr::new(239, 255, 0, 1),
            source: std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, "no route"),
        };
        assert!(format!("{}", err).contains("239.255.0.1"));
    }
}
