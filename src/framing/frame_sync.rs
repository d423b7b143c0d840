//! Resynchronizing parser for the binary waveform protocol.
//!
//! Wire layout, 7 bytes per frame:
//!
//! | Offset | Field       | Value                          |
//! |--------|-------------|--------------------------------|
//! | 0-1    | Sync marker | `AA AA`                        |
//! | 2      | Type        | `04`                           |
//! | 3      | Length      | `80`                           |
//! | 4      | Command     | `02`                           |
//! | 5-6    | Payload     | sample, big-endian, signed 16-bit |
//!
//! Recovery discipline: every failed structural match advances the backlog
//! by exactly one byte. A false sync marker inside noise is healed one byte
//! at a time rather than by skipping a whole candidate frame, so a real
//! frame that merely follows `AA AA` garbage is still found.

use std::collections::VecDeque;

use crate::types::WaveformSample;

const SYNC: u8 = 0xAA;
const FRAME_TYPE: u8 = 0x04;
const FRAME_LENGTH: u8 = 0x80;
const FRAME_COMMAND: u8 = 0x02;

/// Bytes per wire frame.
pub const FRAME_LEN: usize = 7;

/// Streaming binary frame parser.
///
/// Holds only unconsumed bytes; every byte fed in is eventually either
/// consumed into an emitted sample or discarded by the one-byte resync.
/// There is no fatal path; malformed input is never surfaced as an error.
#[derive(Debug, Default)]
pub struct FrameSync {
    backlog: VecDeque<u8>,
}

impl FrameSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and extract every complete frame now available.
    ///
    /// Samples come out in wire order. Fewer than [`FRAME_LEN`] buffered
    /// bytes means waiting for more data; partial frames are never emitted.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<WaveformSample> {
        self.backlog.extend(chunk.iter().copied());

        let mut samples = Vec::new();
        while self.backlog.len() >= FRAME_LEN {
            if self.backlog[0] != SYNC || self.backlog[1] != SYNC {
                self.backlog.pop_front();
                continue;
            }

            if self.backlog[2] != FRAME_TYPE
                || self.backlog[3] != FRAME_LENGTH
                || self.backlog[4] != FRAME_COMMAND
            {
                // False sync match: advance one byte, not seven.
                self.backlog.pop_front();
                continue;
            }

            let raw = u16::from_be_bytes([self.backlog[5], self.backlog[6]]);
            samples.push(WaveformSample::from(raw as i16));
            self.backlog.drain(..FRAME_LEN);
        }
        samples
    }

    /// Unconsumed bytes currently buffered.
    pub fn pending(&self) -> usize {
        self.backlog.len()
    }

    /// Discard any buffered partial frame.
    pub fn clear(&mut self) {
        self.backlog.clear();
    }
}
