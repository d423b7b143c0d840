//! Raw-text waveform decoding.
//!
//! Some firmware revisions stream samples as plain numeric text instead of
//! framed binary. Each received chunk is decoded as UTF-8, split on runs of
//! whitespace, and every parsable token becomes a sample; anything else is
//! skipped.

use crate::types::WaveformSample;

/// Decode a raw text chunk into waveform samples.
pub fn parse_text_samples(chunk: &[u8]) -> Vec<WaveformSample> {
    let text = String::from_utf8_lossy(chunk);
    text.trim()
        .split_whitespace()
        .filter_map(|token| token.parse::<f32>().ok())
        .map(WaveformSample::new)
        .collect()
}
