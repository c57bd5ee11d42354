//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Form/Validation Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Validation error: {message}")]
    Validation { message: String },

    // ─────────────────────────────────────────────────────────────
    // Registration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Secret issuance failed: {message}")]
    Issuance { message: String },

    #[error("Server creation failed: {message}")]
    Creation { message: String },

    // ─────────────────────────────────────────────────────────────
    // Bridge/Gateway Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Gateway error: {message}")]
    Gateway { message: String },

    #[error("Request {id} timed out after {seconds}s")]
    RequestTimeout { id: u64, seconds: u64 },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn issuance(message: impl Into<String>) -> Self {
        Self::Issuance {
            message: message.into(),
        }
    }

    pub fn creation(message: impl Into<String>) -> Self {
        Self::Creation {
            message: message.into(),
        }
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway {
            message: message.into(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Everything the registration workflow can hit is recovered in place:
    /// validation errors surface inline, collaborator failures leave the
    /// form editable for a retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. }
                | Error::Issuance { .. }
                | Error::Creation { .. }
                | Error::Gateway { .. }
                | Error::RequestTimeout { .. }
                | Error::ChannelSend { .. }
                | Error::ChannelClosed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::issuance("backend unavailable");
        assert_eq!(
            err.to_string(),
            "Secret issuance failed: backend unavailable"
        );

        let err = Error::creation("409 Conflict");
        assert_eq!(err.to_string(), "Server creation failed: 409 Conflict");

        let err = Error::RequestTimeout { id: 7, seconds: 30 };
        assert_eq!(err.to_string(), "Request 7 timed out after 30s");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::validation("bad url").is_recoverable());
        assert!(Error::issuance("backend unavailable").is_recoverable());
        assert!(Error::creation("409 Conflict").is_recoverable());
        assert!(Error::gateway("malformed response").is_recoverable());
        assert!(Error::ChannelClosed.is_recoverable());
        assert!(!Error::Io(std::io::Error::other("disk gone")).is_recoverable());
    }

    #[test]
    fn test_error_constructors() {
        let _ = Error::validation("test");
        let _ = Error::issuance("test");
        let _ = Error::creation("test");
        let _ = Error::gateway("test");
        let _ = Error::channel_send("test");
    }
}
