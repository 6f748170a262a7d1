//! Error types for the lanbeacon CLI.

use lanbeacon_core::{AnnounceError, DiscoverError};
use thiserror::Error;

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const INVALID_ARGS: i32 = 4;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Announce error: {0}")]
    Announce(#[from] AnnounceError),

    #[error("Discovery error: {0}")]
    Discover(#[from] DiscoverError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No services found")]
    NoServicesFound,
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Announce(AnnounceError::InvalidConfiguration(_)) => exit_codes::INVALID_ARGS,
            CliError::Announce(_) => exit_codes::NETWORK_ERROR,
            CliError::Discover(DiscoverError::InvalidConfiguration(_)) => exit_codes::INVALID_ARGS,
            CliError::Discover(_) => exit_codes::NETWORK_ERROR,
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
            CliError::NoServicesFound => exit_codes::GENERAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_exit_code() {
        let err = CliError::Discover(DiscoverError::InvalidConfiguration("max_services must be > 0"));
        assert_eq!(err.exit_code(), exit_codes::INVALID_ARGS);
    }

    #[test]
    fn test_zero_interval_exit_code() {
        let err = CliError::Announce(AnnounceError::InvalidConfiguration("interval must be > 0"));
        assert_eq!(err.exit_code(), exit_codes::INVALID_ARGS);
    }

    #[test]
    fn test_no_services_exit_code() {
        assert_eq!(CliError::NoServicesFound.exit_code(), exit_codes::GENERAL_ERROR);
    }
}
