//! Incremental byte-chunk to text-event decoding.
//!
//! A [`ChunkDecoder`] instance lives for exactly one stream attempt. It owns
//! the only mutable framing state of that attempt: the undecoded trailing
//! bytes of a multi-byte character split across chunks, and (for framed
//! streams) the incomplete trailing line. Whatever remains buffered when the
//! stream ends is discarded with the decoder, never double-yielded. Decoding
//! is deterministic: the same byte sequence always yields the same events.

use serde_json::Value;

use crate::stream::event::{TextEvent, WireFormat};

/// Line prefix of one event frame.
const FRAME_PREFIX: &str = "data:";

/// Frame payload marking explicit end of stream.
const DONE_SENTINEL: &str = "[DONE]";

/// Stateful decoder turning raw byte chunks into [`TextEvent`]s.
///
/// Not restartable: create a fresh decoder per attempt.
#[derive(Debug)]
pub struct ChunkDecoder {
    format: WireFormat,
    /// Trailing bytes of an incomplete UTF-8 sequence from the last chunk.
    pending_bytes: Vec<u8>,
    /// Incomplete trailing line, only used for [`WireFormat::EventFrames`].
    line_buffer: String,
}

impl ChunkDecoder {
    /// Create a decoder for the given wire shape.
    pub fn new(format: WireFormat) -> Self {
        Self {
            format,
            pending_bytes: Vec::new(),
            line_buffer: String::new(),
        }
    }

    /// Feed one chunk of bytes, returning every event completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<TextEvent> {
        let decoded = self.decode_utf8(chunk);
        match self.format {
            WireFormat::RawText => {
                if decoded.is_empty() {
                    Vec::new()
                } else {
                    vec![TextEvent::new(decoded)]
                }
            }
            WireFormat::EventFrames => {
                self.line_buffer.push_str(&decoded);
                let mut events = Vec::new();
                // Process every complete line; the final partial line stays
                // buffered for the next chunk.
                while let Some(pos) = self.line_buffer.find('\n') {
                    let line: String = self.line_buffer.drain(..=pos).collect();
                    if let Some(event) = parse_frame_line(line.trim_end_matches(['\n', '\r'])) {
                        events.push(event);
                    }
                }
                events
            }
        }
    }

    /// Decode as much of the accumulated bytes as possible, keeping any
    /// trailing incomplete multi-byte sequence for the next chunk.
    fn decode_utf8(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending_bytes);
        bytes.extend_from_slice(chunk);

        let mut out = String::new();
        loop {
            match std::str::from_utf8(&bytes) {
                Ok(valid) => {
                    out.push_str(valid);
                    return out;
                }
                Err(err) => {
                    let valid_up_to = err.valid_up_to();
                    out.push_str(std::str::from_utf8(&bytes[..valid_up_to]).unwrap_or_default());
                    match err.error_len() {
                        // Invalid sequence in the middle: substitute and move on.
                        Some(len) => {
                            out.push('\u{FFFD}');
                            bytes.drain(..valid_up_to + len);
                        }
                        // Incomplete trailing sequence: keep it for the next chunk.
                        None => {
                            self.pending_bytes = bytes[valid_up_to..].to_vec();
                            return out;
                        }
                    }
                }
            }
        }
    }
}

/// Parse one complete line of a framed stream.
///
/// Lines without the `data:` prefix and the `[DONE]` sentinel produce nothing.
/// A malformed JSON payload is a recoverable decode error: logged and skipped,
/// never aborting the stream.
fn parse_frame_line(line: &str) -> Option<TextEvent> {
    let payload = line.strip_prefix(FRAME_PREFIX)?.trim();
    if payload == DONE_SENTINEL {
        return None;
    }

    match serde_json::from_str::<Value>(payload) {
        Ok(value) => frame_text(&value)
            .filter(|text| !text.is_empty())
            .map(TextEvent::new),
        Err(err) => {
            tracing::warn!(payload, %err, "skipping malformed frame line");
            None
        }
    }
}

/// Extract the text carried by a frame payload.
///
/// Checked in priority order: a direct `text` field, a `delta` field, then the
/// first element of a `parts` list having a `text` field.
pub(crate) fn frame_text(value: &Value) -> Option<String> {
    if let Some(text) = value.get("text").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    if let Some(delta) = value.get("delta").and_then(Value::as_str) {
        return Some(delta.to_string());
    }
    value
        .get("parts")
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
