//! Resilient ingestion pipeline for wireless biosignal sensors.
//!
//! Vitalink turns the continuous byte stream of a serial-linked biosignal
//! front-end (ECG/heart-sound waveforms, glucose/voltammetry telemetry) into
//! physically meaningful, time-ordered measurements.
//!
//! # Features
//!
//! - **Self-healing parsers**: one-byte resync for the binary waveform
//!   protocol, skip-and-continue for JSON telemetry; garbled input never
//!   stops the stream
//! - **Evented transport**: connection lifecycle and byte delivery as a
//!   serialized event channel, one background read task per link
//! - **Signal conditioning**: pluggable moving-average / median / Kalman
//!   filtering with calibrated unit conversion and bounded derived series
//! - **Hardware-free testing**: in-memory links behave exactly like serial
//!   devices
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vitalink::{Command, IngestMode, MeasurementPipeline, Vitalink};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (session, mut channels) =
//!         Vitalink::connect("/dev/rfcomm0", IngestMode::Telemetry).await;
//!
//!     session.send_command(Command::Start);
//!
//!     let mut pipeline = MeasurementPipeline::new();
//!     while let Some(frame) = channels.frames.recv().await {
//!         let record = pipeline.process(&frame);
//!         println!("{} mA at {} s", record.current_ma, record.seconds);
//!     }
//! }
//! ```

// Core types and error handling
mod error;
pub mod types;

// Transport layer
pub mod session;
pub mod transport;
pub mod transports;

// Byte-stream decoding
pub mod framing;

// Signal conditioning and measurement
pub mod filter;
pub mod pipeline;

// Ingest driver
pub mod monitor;

// Core exports
pub use error::{Result, TransportError};
pub use types::*;

// Transport exports
pub use session::TransportSession;
pub use transport::{DialedLink, Dialer, LinkIo};
pub use transports::{MemoryDialer, SerialDialer};

// Decoder exports
pub use framing::{FrameSync, JsonFrameExtractor};

// Filtering and pipeline exports
pub use filter::{
    FilterKind, FilterManager, KalmanFilter1D, MedianFilter, MovingAverageFilter, NoFilter,
    SignalFilter,
};
pub use pipeline::{MeasurementPipeline, TimeSeries, VoltageSeries};

// Ingest exports
pub use monitor::{Monitor, MonitorChannels};

/// Unified entry point for sensor sessions.
///
/// The factory wires a [`TransportSession`] to a spawned [`Monitor`] decode
/// task and starts the connection attempt. Connect outcome, lifecycle
/// changes, and decoded data all arrive on the returned
/// [`MonitorChannels`].
///
/// # Examples
///
/// ## Serial device (Bluetooth SPP binding)
/// ```rust,no_run
/// use vitalink::{IngestMode, Vitalink};
///
/// #[tokio::main]
/// async fn main() {
///     let (session, channels) =
///         Vitalink::connect("/dev/rfcomm0", IngestMode::BinaryWaveform).await;
///     // Use session for commands, channels for data...
/// }
/// ```
///
/// ## Custom transport
/// ```rust
/// use vitalink::{IngestMode, MemoryDialer, Vitalink};
///
/// #[tokio::main]
/// async fn main() {
///     let (dialer, device_end) = MemoryDialer::single();
///     let (session, channels) =
///         Vitalink::connect_with(dialer, "bench-rig", IngestMode::Telemetry).await;
///     // Write to device_end to simulate the sensor.
/// }
/// ```
pub struct Vitalink;

impl Vitalink {
    /// Connect to a sensor on a local serial device path.
    ///
    /// Uses [`SerialDialer`] defaults (115200 baud, 8N1, no flow control).
    /// The connect outcome is delivered on the returned `link` channel, not
    /// as a return value.
    pub async fn connect(
        device_id: &str,
        mode: IngestMode,
    ) -> (TransportSession, MonitorChannels) {
        Self::connect_with(SerialDialer::default(), device_id, mode).await
    }

    /// Connect through a caller-supplied dialer.
    pub async fn connect_with(
        dialer: impl Dialer,
        device_id: &str,
        mode: IngestMode,
    ) -> (TransportSession, MonitorChannels) {
        let (mut session, events) = TransportSession::new(dialer);
        let channels = Monitor::spawn(events, mode);
        session.connect(device_id).await;
        (session, channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;
    use tokio::time::timeout;

    #[tokio::test]
    async fn factory_wires_session_to_monitor() {
        let (dialer, mut peer) = MemoryDialer::single();
        let (session, mut channels) =
            Vitalink::connect_with(dialer, "bench-rig", IngestMode::Telemetry).await;

        assert!(session.is_connected());
        assert!(matches!(
            timeout(Duration::from_secs(2), channels.link.recv()).await,
            Ok(Some(SessionEvent::Connected(_)))
        ));

        peer.write_all(b"{\"Seconds\":10,\"Glucose\":20,\"Volt\":30}")
            .await
            .expect("peer write");

        let frame = timeout(Duration::from_secs(2), channels.frames.recv())
            .await
            .expect("timed out")
            .expect("channel open");
        assert_eq!(frame.seconds, 10.0);
    }

    #[tokio::test]
    async fn factory_reports_failed_dial_on_the_link_channel() {
        let (_session, mut channels) =
            Vitalink::connect_with(MemoryDialer::unreachable(), "bench-rig", IngestMode::Telemetry)
                .await;

        assert!(matches!(
            timeout(Duration::from_secs(2), channels.link.recv()).await,
            Ok(Some(SessionEvent::ConnectionError(_)))
        ));
    }
}
