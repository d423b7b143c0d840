//! Frame extraction from the raw byte stream.
//!
//! The device self-describes its stream: high-rate waveform samples arrive
//! either as fixed-layout binary frames ([`FrameSync`]) or as plain numeric
//! text ([`text::parse_text_samples`]), while telemetry arrives as
//! brace-delimited JSON objects ([`JsonFrameExtractor`]).
//!
//! None of these extractors have an error path. Garbled input is healed
//! locally (one-byte resync for the binary protocol, skip-and-continue for
//! JSON): the stream is continuous, and a corrupted unit must never stop
//! the units behind it.

mod frame_sync;
mod json;
pub mod text;

pub use frame_sync::FrameSync;
pub use json::JsonFrameExtractor;
