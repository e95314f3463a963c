//! Typed event stream over a live SSE response body.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tracing::warn;
use waypoint_abstraction::{CompletePayload, IngestError, StreamEvent};

use crate::sse::SseDecoder;

/// Streaming event parser over a chunked HTTP response body.
///
/// Yields one [`StreamEvent`] per decoded SSE frame, in frame order.
/// Dropping the stream abandons the underlying transport reader, so no
/// events are delivered after cancellation.
pub struct EventStream {
    stream: Pin<Box<dyn Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send>>,
    decoder: SseDecoder,
    pending: VecDeque<StreamEvent>,
    done: bool,
}

impl EventStream {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self {
            stream: Box::pin(response.bytes_stream()),
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl Stream for EventStream {
    type Item = Result<StreamEvent, IngestError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Poll::Ready(Some(Ok(event)));
            }
            if self.done {
                return Poll::Ready(None);
            }

            match self.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => match self.decoder.push(&bytes) {
                    Ok(events) => self.pending.extend(events),
                    Err(e) => {
                        self.done = true;
                        return Poll::Ready(Some(Err(e)));
                    }
                },
                Poll::Ready(Some(Err(e))) => {
                    self.done = true;
                    return Poll::Ready(Some(Err(IngestError::Request(format!(
                        "Stream error: {}",
                        e
                    )))));
                }
                Poll::Ready(None) => {
                    // Stream ended - flush any unterminated trailing frame.
                    let events = self.decoder.finish();
                    self.pending.extend(events);
                    self.done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Drives an event stream to completion.
///
/// `Status` and `Notice` events are forwarded to `on_status` as they arrive;
/// the latest `Complete` payload is kept as the terminal result.
///
/// # Errors
/// Returns `IngestError::IncompleteStream` when the stream ends without ever
/// delivering a `complete` frame, and propagates the first transport or
/// decode error otherwise.
pub async fn collect_result<S, F>(mut stream: S, mut on_status: F) -> Result<CompletePayload, IngestError>
where
    S: Stream<Item = Result<StreamEvent, IngestError>> + Unpin,
    F: FnMut(&str, Option<u8>),
{
    let mut terminal: Option<CompletePayload> = None;

    while let Some(event) = stream.next().await {
        match event? {
            StreamEvent::Status { message, progress } => on_status(&message, progress),
            StreamEvent::Notice { message } => {
                warn!(message = %message, "Service reported a mid-stream error");
                on_status(&message, None);
            }
            StreamEvent::Complete(payload) => terminal = Some(payload),
        }
    }

    terminal.ok_or(IngestError::IncompleteStream)
}
