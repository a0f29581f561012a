//! Error handling for the ambient sound controller
//!
//! Setup problems (missing elements, bad config) fail fast. Audio command
//! failures are reported to the caller after the controller has already
//! applied the user's intent.

use std::path::PathBuf;

use thiserror::Error;

use crate::playback::ResourceCommand;

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, AmbientError>;

/// Main error type for the ambient sound controller
#[derive(Error, Debug)]
pub enum AmbientError {
    // Resource Errors
    #[error("Audio resource refused {command}: {reason}")]
    ResourceCommand {
        command: ResourceCommand,
        reason: String,
    },

    // Collaborator Errors
    #[error("Element not found: #{id}")]
    MissingElement { id: String },

    #[error("Element #{id} is not a {expected}")]
    WrongElementKind { id: String, expected: &'static str },

    #[error("Failed to attach '{event}' listener: {reason}")]
    ListenerAttach { event: &'static str, reason: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // Input Errors
    #[error("Unknown playback event: '{token}' (expected play, stop, visible or hidden)")]
    InvalidEvent { token: String },

    #[error("Failed to read config: {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AmbientError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            AmbientError::ResourceCommand { .. } => "RESOURCE_COMMAND_FAILED",
            AmbientError::MissingElement { .. } => "MISSING_ELEMENT",
            AmbientError::WrongElementKind { .. } => "WRONG_ELEMENT_KIND",
            AmbientError::ListenerAttach { .. } => "LISTENER_ATTACH_FAILED",
            AmbientError::InvalidConfig { .. } => "INVALID_CONFIG",
            AmbientError::InvalidEvent { .. } => "INVALID_EVENT",
            AmbientError::ConfigRead { .. } => "CONFIG_READ_FAILED",
            AmbientError::Io(_) => "IO_ERROR",
            AmbientError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable
    ///
    /// A refused audio command leaves the controller consistent, so the next
    /// user action can succeed. Misconfigured collaborators cannot recover
    /// without fixing the page.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AmbientError::ResourceCommand { .. } | AmbientError::InvalidEvent { .. }
        )
    }

    /// Whether this error is a setup-time collaborator problem
    pub fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            AmbientError::MissingElement { .. }
                | AmbientError::WrongElementKind { .. }
                | AmbientError::ListenerAttach { .. }
                | AmbientError::InvalidConfig { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AmbientError::MissingElement {
            id: "btnPlay".to_string(),
        };
        assert_eq!(err.error_code(), "MISSING_ELEMENT");

        let err = AmbientError::ResourceCommand {
            command: ResourceCommand::Start,
            reason: "NotAllowedError".to_string(),
        };
        assert_eq!(err.error_code(), "RESOURCE_COMMAND_FAILED");
    }

    #[test]
    fn test_resource_failure_is_recoverable() {
        let err = AmbientError::ResourceCommand {
            command: ResourceCommand::Start,
            reason: "autoplay blocked".to_string(),
        };
        assert!(err.is_recoverable());
        assert!(!err.is_misconfiguration());
    }

    #[test]
    fn test_missing_element_is_misconfiguration() {
        let err = AmbientError::MissingElement {
            id: "audio".to_string(),
        };
        assert!(!err.is_recoverable());
        assert!(err.is_misconfiguration());
    }

    #[test]
    fn test_display_messages() {
        let err = AmbientError::ResourceCommand {
            command: ResourceCommand::Start,
            reason: "NotAllowedError".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Audio resource refused start: NotAllowedError"
        );

        let err = AmbientError::WrongElementKind {
            id: "audio".to_string(),
            expected: "HTMLAudioElement",
        };
        assert_eq!(err.to_string(), "Element #audio is not a HTMLAudioElement");
    }
}
