//! Streaming client for the Waypoint generation service.
//!
//! This crate owns the transport side of the pipeline: it opens generation
//! requests against the service, decodes the chunked Server-Sent-Events
//! response into typed [`StreamEvent`](waypoint_abstraction::StreamEvent)s,
//! and enforces the terminal-frame contract (a stream that ends without a
//! `complete` frame is an error distinct from a transport failure).
//!
//! # Layers
//!
//! - [`SseDecoder`]: pure frame decoder, no I/O; the unit under test for
//!   chunk-boundary behavior.
//! - [`EventStream`]: `futures::Stream` adapter over a live response body.
//! - [`WaypointClient`]: endpoint wiring (summarize, roadmap, feasibility)
//!   plus run-to-completion drivers.

pub mod client;
pub mod sse;
pub mod stream;

pub use client::WaypointClient;
pub use sse::SseDecoder;
pub use stream::{collect_result, EventStream};
