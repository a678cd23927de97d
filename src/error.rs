//! Error types for Abroad Assist.
//!
//! The dialogue engine itself never fails; these cover configuration and the
//! session hosts around it.

use uuid::Uuid;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session {id} not found")]
    NotFound { id: Uuid },
}

/// Host I/O errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel {name} failed to start: {reason}")]
    StartupFailed { name: String, reason: String },

    #[error("Channel {name} stopped unexpectedly: {reason}")]
    Stopped { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_and_displays() {
        let err: Error = ConfigError::InvalidValue {
            key: "ABROAD_ASSIST_PHONE_NUMBER".to_string(),
            message: "must contain at least one digit".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid configuration value for \
             ABROAD_ASSIST_PHONE_NUMBER: must contain at least one digit"
        );
    }

    #[test]
    fn io_error_becomes_channel_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin closed");
        let err: Error = ChannelError::from(io).into();
        assert!(matches!(err, Error::Channel(ChannelError::Io(_))));
        assert!(err.to_string().contains("stdin closed"));
    }
}
