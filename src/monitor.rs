//! Ingest driver: routes session events through the active decoder.
//!
//! The monitor task consumes one session's event channel, feeds received
//! chunks to the decoder selected by [`IngestMode`], and fans the results
//! out on dedicated channels. Decoding is synchronous and allocation-light;
//! the task suspends only while waiting for events.
//!
//! Telemetry objects get a wall-clock `receive_time` stamp
//! (`HH:MM:SS.mmm`, local time) as they are decoded; the stamp is not part
//! of the wire bytes.

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::framing::{FrameSync, JsonFrameExtractor, text};
use crate::types::{IngestMode, SessionEvent, TelemetryFrame, WaveformSample};

/// Receiving ends of a spawned monitor.
pub struct MonitorChannels {
    /// Waveform samples (binary and raw-text modes).
    pub samples: mpsc::UnboundedReceiver<WaveformSample>,
    /// Decoded telemetry frames (telemetry mode), receive-time stamped.
    pub frames: mpsc::UnboundedReceiver<TelemetryFrame>,
    /// Lifecycle events forwarded from the session (everything but bytes).
    pub link: mpsc::UnboundedReceiver<SessionEvent>,
}

/// Spawns and manages the decode task for one session.
pub struct Monitor;

impl Monitor {
    /// Spawn the decode task over a session's event channel.
    ///
    /// The task ends when the session (and its channel) is dropped, or when
    /// every output receiver has been dropped.
    pub fn spawn(
        events: mpsc::UnboundedReceiver<SessionEvent>,
        mode: IngestMode,
    ) -> MonitorChannels {
        let (sample_tx, samples) = mpsc::unbounded_channel();
        let (frame_tx, frames) = mpsc::unbounded_channel();
        let (link_tx, link) = mpsc::unbounded_channel();

        tokio::spawn(ingest_task(events, mode, sample_tx, frame_tx, link_tx));

        MonitorChannels { samples, frames, link }
    }
}

async fn ingest_task(
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
    mode: IngestMode,
    sample_tx: mpsc::UnboundedSender<WaveformSample>,
    frame_tx: mpsc::UnboundedSender<TelemetryFrame>,
    link_tx: mpsc::UnboundedSender<SessionEvent>,
) {
    debug!(?mode, "monitor task started");
    let mut frame_sync = FrameSync::new();
    let mut extractor = JsonFrameExtractor::new();
    let mut chunk_count = 0u64;

    while let Some(event) = events.recv().await {
        if sample_tx.is_closed() && frame_tx.is_closed() && link_tx.is_closed() {
            debug!("all monitor receivers dropped, shutting down");
            break;
        }

        match event {
            SessionEvent::Bytes(chunk) => {
                chunk_count += 1;
                trace!(len = chunk.len(), chunk_count, "decoding chunk");

                match mode {
                    IngestMode::BinaryWaveform => {
                        for sample in frame_sync.feed(&chunk) {
                            let _ = sample_tx.send(sample);
                        }
                    }
                    IngestMode::TextWaveform => {
                        for sample in text::parse_text_samples(&chunk) {
                            let _ = sample_tx.send(sample);
                        }
                    }
                    IngestMode::Telemetry => {
                        let decoded = String::from_utf8_lossy(&chunk);
                        for object in extractor.feed(&decoded) {
                            let frame =
                                TelemetryFrame::from_value(&object, receive_timestamp());
                            let _ = frame_tx.send(frame);
                        }
                    }
                }
            }
            other => {
                if matches!(other, SessionEvent::Disconnected) {
                    // Partial buffers belong to the link that just died.
                    frame_sync.clear();
                    extractor.clear();
                }
                let _ = link_tx.send(other);
            }
        }
    }

    debug!(chunk_count, "monitor task ended");
}

/// Local wall-clock stamp in `HH:MM:SS.mmm` form.
fn receive_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S%.3f").to_string()
}
