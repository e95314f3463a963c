//! Shared data model for Waypoint.
//!
//! This crate defines the core types exchanged between the streaming client,
//! the roadmap parser, and the consumers of both: stream events, the terminal
//! generation payload, and the structured roadmap produced from it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder duration assigned to a phase before estimation runs.
pub const UNESTIMATED_DURATION: &str = "To be determined";

/// Status message used when a `status` frame carries no message of its own.
pub const DEFAULT_STATUS_MESSAGE: &str = "Working...";

/// Represents an error that can occur while ingesting a generation stream.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngestError {
    /// An error occurred at the transport level (e.g., network issues, connection drop).
    #[error("Request Error: {0}")]
    Request(String),

    /// The service returned a non-success HTTP status before streaming began.
    #[error("Service returned HTTP {status}: {message}")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// The response body or status text, when available.
        message: String,
    },

    /// The response body could not be decoded as UTF-8 text.
    #[error("Decode Error: {0}")]
    Decode(String),

    /// A local file could not be read for upload.
    #[error("File Error: {0}")]
    File(String),

    /// The stream ended without ever delivering a terminal `complete` frame.
    ///
    /// Distinct from a transport error: the connection worked, but the
    /// service never produced a result.
    #[error("stream ended without terminal result")]
    IncompleteStream,

    /// The service delivered a terminal frame reporting failure.
    #[error("Service Error: {0}")]
    Service(String),
}

/// One decoded event from a generation stream.
///
/// Events arrive in frame order; `Complete` is the terminal payload when
/// present, while `Status` and `Notice` are informational and never end
/// the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StreamEvent {
    /// A progress update from the service.
    Status {
        /// Human-readable description of the current stage.
        message: String,
        /// Completion percentage, clamped to 0-100 when present.
        progress: Option<u8>,
    },

    /// A recoverable error reported mid-stream. The service may keep going,
    /// so this is informational rather than terminal.
    Notice {
        /// The reported error message.
        message: String,
    },

    /// The terminal result payload. If repeated, the last one wins.
    Complete(CompletePayload),
}

/// The terminal payload of a generation stream.
///
/// Field names match the service's wire format; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletePayload {
    /// Whether generation succeeded.
    #[serde(default)]
    pub success: bool,

    /// Optional human-readable outcome message.
    #[serde(default)]
    pub message: Option<String>,

    /// The freeform roadmap text, when the request produced one.
    #[serde(default)]
    pub roadmap: Option<String>,

    /// The refined document summary used for generation.
    #[serde(default)]
    pub refined_summary: Option<String>,

    /// The raw summary extracted from the uploaded document.
    #[serde(default)]
    pub initial_summary: Option<String>,
}

impl CompletePayload {
    /// Returns the best available summary text: the refined summary when
    /// present, otherwise the initial one, otherwise empty.
    pub fn summary(&self) -> &str {
        self.refined_summary
            .as_deref()
            .or(self.initial_summary.as_deref())
            .unwrap_or_default()
    }
}

/// Response from the non-streaming summarize endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    /// Whether summarization succeeded.
    #[serde(default)]
    pub success: bool,

    /// The extracted summary text.
    #[serde(default)]
    pub summary: Option<String>,

    /// Optional outcome message (set on failure).
    #[serde(default)]
    pub message: Option<String>,
}

/// One step of a generated implementation roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Sequential 1-based identifier, contiguous within one parse.
    pub id: u32,

    /// The phase title, verbatim from the section heading.
    pub name: String,

    /// The phase objective; empty when the text never stated one.
    #[serde(default)]
    pub objective: String,

    /// Ordered task descriptions.
    pub tasks: Vec<String>,

    /// Estimated duration, assigned after parsing.
    pub duration: String,
}

impl Phase {
    /// Creates a phase with the placeholder duration and no content yet.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            objective: String::new(),
            tasks: Vec::new(),
            duration: UNESTIMATED_DURATION.to_string(),
        }
    }
}

/// A fully assembled roadmap, owned by the requesting caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapResult {
    /// Display name for the project, typically the uploaded file's stem.
    pub project_name: String,

    /// Ordered phases extracted from the roadmap text.
    pub phases: Vec<Phase>,

    /// The document summary the roadmap was generated from.
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_payload_prefers_refined_summary() {
        let payload = CompletePayload {
            refined_summary: Some("refined".to_string()),
            initial_summary: Some("initial".to_string()),
            ..Default::default()
        };
        assert_eq!(payload.summary(), "refined");
    }

    #[test]
    fn test_complete_payload_falls_back_to_initial_summary() {
        let payload = CompletePayload {
            initial_summary: Some("initial".to_string()),
            ..Default::default()
        };
        assert_eq!(payload.summary(), "initial");
    }

    #[test]
    fn test_complete_payload_ignores_unknown_fields() {
        let json = r#"{"success": true, "roadmap": "text", "extra_field": 42}"#;
        let payload: CompletePayload = serde_json::from_str(json).unwrap();
        assert!(payload.success);
        assert_eq!(payload.roadmap.as_deref(), Some("text"));
    }

    #[test]
    fn test_phase_new_uses_placeholder_duration() {
        let phase = Phase::new(1, "Prototype Development");
        assert_eq!(phase.duration, UNESTIMATED_DURATION);
        assert!(phase.objective.is_empty());
        assert!(phase.tasks.is_empty());
    }

    #[test]
    fn test_ingest_error_display_distinguishes_incomplete_stream() {
        let incomplete = IngestError::IncompleteStream.to_string();
        let transport = IngestError::Request("connection refused".to_string()).to_string();
        assert!(incomplete.contains("without terminal result"));
        assert!(transport.contains("connection refused"));
        assert_ne!(incomplete, transport);
    }
}
