//! Error types for taskdeck
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, invalid input)
//! - 4: Operation failed (io, serialization)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the taskdeck CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskdeck operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No data directory available for this platform")]
    NoDataDir,

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Cannot write data file {0}")]
    DataFileWrite(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) | Error::InvalidConfig(_) | Error::NoDataDir => {
                exit_codes::USER_ERROR
            }
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::DataFileWrite(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for taskdeck operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_map_to_exit_code_2() {
        assert_eq!(Error::InvalidArgument("x".to_string()).exit_code(), 2);
        assert_eq!(Error::InvalidConfig("x".to_string()).exit_code(), 2);
    }

    #[test]
    fn operation_failures_map_to_exit_code_4() {
        let err = Error::OperationFailed("boom".to_string());
        assert_eq!(err.exit_code(), 4);

        let io = Error::from(std::io::Error::new(std::io::ErrorKind::Other, "io"));
        assert_eq!(io.exit_code(), 4);
    }
}
