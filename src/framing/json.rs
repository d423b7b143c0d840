//! Brace-delimited JSON telemetry extractor.
//!
//! Telemetry text arrives interleaved with line noise and arbitrary chunk
//! boundaries: one read may carry several `{...}{...}` objects, or half of
//! one. The extractor accumulates text and cuts candidate spans on brace
//! boundaries.
//!
//! Two deliberate policies, kept from the device's documented behavior:
//!
//! - Text containing no `{` at all is assumed to carry no recoverable
//!   telemetry and is discarded wholesale, diagnostic noise included.
//! - Span detection takes the first `}` after the opening `{`; it is not
//!   nesting-aware. The telemetry schema is flat, so a nested payload would
//!   be truncated. This is a known limitation.

use serde_json::Value;

/// Streaming extractor for `{...}` telemetry spans.
///
/// Spans that fail to parse as JSON are dropped and decoding continues with
/// the rest of the buffer; nothing in this type is an error.
#[derive(Debug, Default)]
pub struct JsonFrameExtractor {
    buffer: String,
}

impl JsonFrameExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of decoded text and extract every complete object.
    pub fn feed(&mut self, chunk: &str) -> Vec<Value> {
        if chunk.is_empty() {
            return Vec::new();
        }
        self.buffer.push_str(chunk);

        let mut objects = Vec::new();
        loop {
            let Some(start) = self.buffer.find('{') else {
                // No opening brace anywhere: the whole buffer is noise.
                self.buffer.clear();
                break;
            };

            let Some(end) = self.buffer[start..].find('}').map(|i| start + i) else {
                // Opened but not yet closed: keep from `{`, wait for more.
                if start > 0 {
                    self.buffer.drain(..start);
                }
                break;
            };

            let span = self.buffer[start..=end].to_string();
            self.buffer.drain(..=end);

            match serde_json::from_str::<Value>(&span) {
                Ok(value) => objects.push(value),
                Err(_) => continue,
            }
        }
        objects
    }

    /// Bytes of text currently awaiting a span boundary.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Discard any partially accumulated text.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn garbage_before_object_yields_exactly_one() {
        let mut extractor = JsonFrameExtractor::new();
        let objects = extractor.feed("garbage before {\"Seconds\":1,\"Glucose\":2,\"Volt\":3}");
        assert_eq!(objects, vec![json!({"Seconds": 1, "Glucose": 2, "Volt": 3})]);
        assert_eq!(extractor.pending(), 0);
    }

    #[test]
    fn braceless_text_empties_the_buffer() {
        let mut extractor = JsonFrameExtractor::new();
        assert!(extractor.feed("noopeningbrace").is_empty());
        assert_eq!(extractor.pending(), 0);
    }

    #[test]
    fn unclosed_object_is_retained_from_the_brace() {
        let mut extractor = JsonFrameExtractor::new();
        assert!(extractor.feed("junk {\"Seconds\":1").is_empty());
        assert_eq!(extractor.pending(), "{\"Seconds\":1".len());

        let objects = extractor.feed("}");
        assert_eq!(objects, vec![json!({"Seconds": 1})]);
    }

    #[test]
    fn several_objects_in_one_chunk_all_decode() {
        let mut extractor = JsonFrameExtractor::new();
        let objects = extractor.feed("{\"a\":1}{\"b\":2} trailing {\"c\":3}");
        assert_eq!(objects, vec![json!({"a": 1}), json!({"b": 2}), json!({"c": 3})]);
    }

    #[test]
    fn invalid_span_is_skipped_without_stopping_the_stream() {
        let mut extractor = JsonFrameExtractor::new();
        let objects = extractor.feed("{not json}{\"ok\":true}");
        assert_eq!(objects, vec![json!({"ok": true})]);
    }

    #[test]
    fn nested_object_is_truncated_at_first_close() {
        // Non-nesting-aware boundary: the inner close brace ends the span,
        // the mangled remainder fails to parse and is dropped.
        let mut extractor = JsonFrameExtractor::new();
        let objects = extractor.feed("{\"outer\":{\"inner\":1}}");
        assert!(objects.is_empty());
        assert_eq!(extractor.pending(), 0);
    }

    #[test]
    fn empty_chunk_leaves_state_untouched() {
        let mut extractor = JsonFrameExtractor::new();
        extractor.feed("{\"Seconds\"");
        let pending = extractor.pending();
        assert!(extractor.feed("").is_empty());
        assert_eq!(extractor.pending(), pending);
    }

    proptest! {
        /// Feeding a stream whole or split at arbitrary points decodes the
        /// same objects.
        #[test]
        fn split_points_do_not_affect_output(
            frames in prop::collection::vec(
                prop::collection::btree_map("[a-zA-Z]{1,6}", -1000i64..1000i64, 1..4),
                0..6,
            ),
            separators in prop::collection::vec("[a-z ]{0,5}", 0..7),
            cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
        ) {
            let mut stream = String::new();
            for (i, fields) in frames.iter().enumerate() {
                if let Some(sep) = separators.get(i) {
                    stream.push_str(sep);
                }
                stream.push_str(
                    &serde_json::to_string(&fields).expect("map serializes"),
                );
            }

            let mut whole = JsonFrameExtractor::new();
            let expected = whole.feed(&stream);

            let mut indices: Vec<usize> = cuts
                .iter()
                .map(|c| c.index(stream.len() + 1))
                .filter(|i| stream.is_char_boundary(*i))
                .collect();
            indices.push(0);
            indices.push(stream.len());
            indices.sort_unstable();

            let mut split = JsonFrameExtractor::new();
            let mut got = Vec::new();
            for pair in indices.windows(2) {
                got.extend(split.feed(&stream[pair[0]..pair[1]]));
            }

            prop_assert_eq!(got, expected);
        }
    }
}
