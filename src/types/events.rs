//! Session events, connection state, and the outbound command vocabulary.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// Identity of a remote transport endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Human-readable device name.
    pub name: String,
    /// Transport address (serial path, Bluetooth MAC, ...).
    pub address: String,
}

impl DeviceInfo {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { name: name.into(), address: address.into() }
    }
}

/// Connection lifecycle state, owned exclusively by the session.
///
/// Transitions happen only on `connect()`/`disconnect()` and on IO failure
/// in the background read task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Lifecycle and data events delivered on the session's event channel.
///
/// Events are emitted onto a single-consumer channel, so the consumer
/// observes them strictly in emission order and never concurrently. `Bytes`
/// transfers ownership of the chunk to the consumer.
#[derive(Debug)]
pub enum SessionEvent {
    /// The link handshake succeeded; the background read task is running.
    Connected(DeviceInfo),

    /// A non-empty chunk arrived from the device.
    Bytes(Bytes),

    /// A connect, read, or send failure. Read failures are followed by
    /// `Disconnected`; send failures are not.
    ConnectionError(TransportError),

    /// The link has been released; no further `Bytes` will be delivered.
    Disconnected,
}

/// Which decoder the ingest driver routes received bytes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngestMode {
    /// Framed binary waveform samples (ECG protocol).
    BinaryWaveform,
    /// Plain numeric text waveform samples (heart-sound stream).
    TextWaveform,
    /// Brace-delimited JSON telemetry (glucose/voltammetry stream).
    Telemetry,
}

/// Outbound control commands, sent verbatim as ASCII lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Pause,
    Resume,
}

impl Command {
    pub fn as_str(self) -> &'static str {
        match self {
            Command::Start => "START",
            Command::Pause => "PAUSE",
            Command::Resume => "RESUME",
        }
    }

    /// The on-wire form: the command word terminated by `\r\n`.
    pub fn line(self) -> String {
        format!("{}\r\n", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_crlf_terminated_lines() {
        assert_eq!(Command::Start.line(), "START\r\n");
        assert_eq!(Command::Pause.line(), "PAUSE\r\n");
        assert_eq!(Command::Resume.line(), "RESUME\r\n");
    }

    #[test]
    fn default_state_is_disconnected() {
        assert_eq!(ConnectionState::default(), ConnectionState::Disconnected);
    }
}
