//! Error types for itop-boot operations.
//!
//! This module defines [`BootError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Environment resolution never fails; it degrades to the session or
//!   default environment instead
//! - Use `BootError` for failures a caller needs to tell apart (missing
//!   configuration bundle, bad settings, unknown session)
//! - Use `anyhow::Error` (via `BootError::Other`) for storage failures

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for itop-boot operations.
#[derive(Debug, Error)]
pub enum BootError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid settings structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Requested session does not exist in the store.
    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for itop-boot operations.
pub type Result<T> = std::result::Result<T, BootError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = BootError::ConfigNotFound {
            path: PathBuf::from("/var/www/itop/conf/qa/config-itop.php"),
        };
        assert!(err.to_string().contains("conf/qa/config-itop.php"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = BootError::ConfigParseError {
            path: PathBuf::from("/itop-boot.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/itop-boot.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn config_validation_error_displays_message() {
        let err = BootError::ConfigValidationError {
            message: "default_environment must not be empty".into(),
        };
        assert!(err.to_string().contains("default_environment"));
    }

    #[test]
    fn session_not_found_displays_id() {
        let err = BootError::SessionNotFound {
            id: "sess_1_00".into(),
        };
        assert!(err.to_string().contains("sess_1_00"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BootError = io_err.into();
        assert!(matches!(err, BootError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: BootError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.to_string(), "disk full");
    }
}
