//! Error types for transport and session handling.
//!
//! Only the transport layer surfaces errors. Framing and decoding
//! irregularities are recovered locally inside the parsers (resync, skip) and
//! never reach this type: a single corrupted unit must not stop subsequent
//! valid units from being processed.
//!
//! Errors carry a human-readable reason plus an optional structured source,
//! and classify themselves as retryable or not:
//!
//! ```rust
//! use vitalink::TransportError;
//!
//! let error = TransportError::connection_failed("/dev/rfcomm0", "device unreachable");
//! if error.is_retryable() {
//!     println!("can retry this operation");
//! }
//! ```

use std::time::Duration;
use thiserror::Error;

/// Result type alias for transport operations.
pub type Result<T, E = TransportError> = std::result::Result<T, E>;

/// Main error type for the transport layer.
///
/// Write failures (`Send`) are reported but never change connection state;
/// connect and read failures transition the session back to `Disconnected`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransportError {
    #[error("failed to connect to {device}: {reason}")]
    Connection {
        device: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("transport authorization denied: {reason}")]
    Authorization { reason: String },

    #[error("read interrupted: {reason}")]
    Read {
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("send failed: {reason}")]
    Send {
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("not connected")]
    NotConnected,
}

impl TransportError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Connection { .. } => true,
            TransportError::Timeout { .. } => true,
            TransportError::Send { .. } => true,
            TransportError::NotConnected => true,
            TransportError::Authorization { .. } => false,
            TransportError::Read { .. } => false,
        }
    }

    /// Helper constructor for connect failures.
    pub fn connection_failed(device: impl Into<String>, reason: impl Into<String>) -> Self {
        TransportError::Connection { device: device.into(), reason: reason.into(), source: None }
    }

    /// Helper constructor for connect failures with an underlying cause.
    pub fn connection_failed_with_source(
        device: impl Into<String>,
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        TransportError::Connection {
            device: device.into(),
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Helper constructor for authorization failures.
    pub fn authorization_denied(reason: impl Into<String>) -> Self {
        TransportError::Authorization { reason: reason.into() }
    }

    /// Helper constructor for read-loop failures.
    pub fn read_interrupted(reason: impl Into<String>, source: Option<std::io::Error>) -> Self {
        TransportError::Read { reason: reason.into(), source }
    }

    /// Helper constructor for write-path failures.
    pub fn send_failed(reason: impl Into<String>, source: Option<std::io::Error>) -> Self {
        TransportError::Send { reason: reason.into(), source }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            return TransportError::Authorization { reason: err.to_string() };
        }
        TransportError::Read { reason: err.to_string(), source: Some(err) }
    }
}

impl From<tokio_serial::Error> for TransportError {
    fn from(err: tokio_serial::Error) -> Self {
        match err.kind {
            tokio_serial::ErrorKind::Io(std::io::ErrorKind::PermissionDenied) => {
                TransportError::Authorization { reason: err.description }
            }
            _ => TransportError::Connection {
                device: String::new(),
                reason: err.description.clone(),
                source: Some(Box::new(err)),
            },
        }
    }
}
