//! Core value types for the ingestion pipeline.
//!
//! Everything that flows between components lives here: waveform samples and
//! telemetry frames (transient units, consumed immediately by the next
//! stage), export records (append-only, never mutated after creation), and
//! the session-level event and command vocabulary.

mod events;
mod telemetry;

pub use events::{Command, ConnectionState, DeviceInfo, IngestMode, SessionEvent};
pub use telemetry::{TelemetryFrame, TelemetryRecord, WaveformSample};
