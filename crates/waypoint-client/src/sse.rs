//! Incremental Server-Sent-Events frame decoding.
//!
//! The generation service frames its responses as SSE: `event:` and `data:`
//! lines, one frame per blank line. Chunks arrive at arbitrary byte offsets,
//! so the decoder buffers partial frames (and partial UTF-8 sequences) across
//! pushes and only yields fully terminated frames.

use tracing::debug;
use waypoint_abstraction::{CompletePayload, IngestError, StreamEvent, DEFAULT_STATUS_MESSAGE};

/// Incremental decoder from raw response chunks to typed stream events.
///
/// Feed chunks with [`push`](Self::push) as they arrive, then call
/// [`finish`](Self::finish) at end of stream to flush a final frame that
/// lacks a trailing blank line.
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Bytes held back because they end mid-way through a UTF-8 sequence.
    carry: Vec<u8>,
    /// Decoded text not yet terminated by a blank line.
    buffer: String,
}

impl SseDecoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a raw chunk and returns every event completed by it.
    ///
    /// # Errors
    /// Returns `IngestError::Decode` when the chunk contains bytes that can
    /// never form valid UTF-8.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<StreamEvent>, IngestError> {
        self.carry.extend_from_slice(chunk);
        let text = match std::str::from_utf8(&self.carry) {
            Ok(text) => {
                let text = text.to_string();
                self.carry.clear();
                text
            }
            Err(e) if e.error_len().is_none() => {
                // Incomplete trailing sequence; decode up to it and keep the rest.
                let valid = e.valid_up_to();
                let text =
                    String::from_utf8(self.carry[..valid].to_vec()).unwrap_or_default();
                self.carry.drain(..valid);
                text
            }
            Err(e) => {
                return Err(IngestError::Decode(format!(
                    "Invalid UTF-8 in stream chunk: {}",
                    e
                )));
            }
        };

        self.buffer.push_str(&text);
        Ok(self.drain_frames())
    }

    /// Flushes the decoder at end of stream.
    ///
    /// Well-behaved producers do not guarantee a trailing blank line, so any
    /// buffered unterminated frame gets a synthetic terminator and one final
    /// parse attempt. Leftover partial UTF-8 at this point cannot belong to a
    /// complete frame and is dropped.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        if !self.carry.is_empty() {
            debug!(bytes = self.carry.len(), "Dropping partial UTF-8 sequence at end of stream");
            self.carry.clear();
        }
        if self.buffer.trim().is_empty() {
            self.buffer.clear();
            return Vec::new();
        }
        self.buffer.push_str("\n\n");
        self.drain_frames()
    }

    /// Splits off every blank-line-terminated frame in the buffer.
    fn drain_frames(&mut self) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        while let Some(end_idx) = self.buffer.find("\n\n") {
            let frame = self.buffer[..end_idx].to_string();
            self.buffer = self.buffer[end_idx + 2..].to_string();

            if let Some(event) = parse_frame(&frame) {
                events.push(event);
            }
        }
        events
    }
}

/// Parses one SSE frame into a stream event.
///
/// Returns `None` for frames that carry nothing actionable: unknown event
/// types, empty payloads, and payloads that fail to parse as JSON (a single
/// malformed frame never aborts the stream).
fn parse_frame(frame: &str) -> Option<StreamEvent> {
    let mut event_type = "message";
    let mut data = String::new();

    for line in frame.lines() {
        if let Some(rest) = line.strip_prefix("event:") {
            event_type = rest.trim();
        } else if let Some(rest) = line.strip_prefix("data:") {
            // Multiple data lines concatenate in arrival order, no separator.
            data.push_str(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }

    if data.is_empty() {
        return None;
    }

    match event_type {
        "status" => {
            let value: serde_json::Value = match serde_json::from_str(&data) {
                Ok(value) => value,
                Err(e) => {
                    debug!(error = %e, data = %data, "Skipping status frame with malformed JSON");
                    return None;
                }
            };
            let message = value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or(DEFAULT_STATUS_MESSAGE)
                .to_string();
            let progress = value
                .get("progress")
                .and_then(serde_json::Value::as_f64)
                .map(|p| p.clamp(0.0, 100.0).round() as u8);
            Some(StreamEvent::Status { message, progress })
        }
        "error" => {
            let value: serde_json::Value = match serde_json::from_str(&data) {
                Ok(value) => value,
                Err(e) => {
                    debug!(error = %e, data = %data, "Skipping error frame with malformed JSON");
                    return None;
                }
            };
            let message = value
                .get("error")
                .or_else(|| value.get("message"))
                .and_then(serde_json::Value::as_str)
                .unwrap_or("Generation error")
                .to_string();
            Some(StreamEvent::Notice { message })
        }
        "complete" => match serde_json::from_str::<CompletePayload>(&data) {
            Ok(payload) => Some(StreamEvent::Complete(payload)),
            Err(e) => {
                debug!(error = %e, data = %data, "Skipping complete frame with malformed JSON");
                None
            }
        },
        other => {
            debug!(event_type = %other, "Ignoring unknown SSE event type");
            None
        }
    }
}
