//! HTTP client for the generation service.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::json;
use tracing::{debug, error};
use waypoint_abstraction::{CompletePayload, IngestError, SummarizeResponse};

use crate::stream::{collect_result, EventStream};

/// Client for the research-assistant generation service.
///
/// One instance can serve any number of sequential or concurrent requests;
/// each request owns its own event stream and buffer.
#[derive(Debug, Clone)]
pub struct WaypointClient {
    base_url: String,
    client: reqwest::Client,
}

impl WaypointClient {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client: reqwest::Client::new() }
    }

    /// Uploads a document and returns its extracted summary.
    ///
    /// Supports the formats the service can extract text from (PDF, DOCX,
    /// plain text).
    pub async fn summarize_file(&self, path: &Path) -> Result<SummarizeResponse, IngestError> {
        let file_bytes = tokio::fs::read(path).await.map_err(|e| {
            IngestError::File(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                IngestError::File(format!("Invalid file name: {}", path.display()))
            })?
            .to_string();

        let mime = detect_mime_type_from_extension(path);
        debug!(path = %path.display(), mime = %mime, "Uploading document for summarization");

        let form = Form::new().part(
            "file",
            Part::bytes(file_bytes)
                .file_name(file_name)
                .mime_str(&mime)
                .map_err(|e| IngestError::Request(format!("Failed to set MIME type: {}", e)))?,
        );

        let response = self
            .client
            .post(format!("{}/summarize/file", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| IngestError::Request(format!("Network error: {}", e)))?;

        let response = check_status(response).await?;
        response
            .json::<SummarizeResponse>()
            .await
            .map_err(|e| IngestError::Decode(format!("Invalid summarize response: {}", e)))
    }

    /// Summarizes raw text without a file upload.
    pub async fn summarize_text(&self, text: &str) -> Result<SummarizeResponse, IngestError> {
        let response = self
            .client
            .post(format!("{}/summarize/text", self.base_url))
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| IngestError::Request(format!("Network error: {}", e)))?;

        let response = check_status(response).await?;
        response
            .json::<SummarizeResponse>()
            .await
            .map_err(|e| IngestError::Decode(format!("Invalid summarize response: {}", e)))
    }

    /// Starts roadmap generation from a document summary.
    ///
    /// Returns the live event stream; use [`collect_result`] or iterate it
    /// directly for finer control.
    pub async fn stream_roadmap(&self, summary: &str) -> Result<EventStream, IngestError> {
        self.open_stream("/roadmap/generate-from-summary-stream", summary).await
    }

    /// Starts feasibility assessment from a document summary.
    pub async fn stream_feasibility(&self, summary: &str) -> Result<EventStream, IngestError> {
        self.open_stream("/feasibility/generate-stream", summary).await
    }

    /// Runs roadmap generation to completion, forwarding status updates.
    ///
    /// # Errors
    /// Transport failures, a stream with no terminal frame, and a terminal
    /// frame reporting failure each surface as their own `IngestError`
    /// variant so callers can message them differently.
    pub async fn generate_roadmap<F>(
        &self,
        summary: &str,
        on_status: F,
    ) -> Result<CompletePayload, IngestError>
    where
        F: FnMut(&str, Option<u8>),
    {
        let stream = self.stream_roadmap(summary).await?;
        let payload = collect_result(stream, on_status).await?;
        into_service_result(payload)
    }

    /// Runs feasibility assessment to completion, forwarding status updates.
    pub async fn generate_feasibility<F>(
        &self,
        summary: &str,
        on_status: F,
    ) -> Result<CompletePayload, IngestError>
    where
        F: FnMut(&str, Option<u8>),
    {
        let stream = self.stream_feasibility(summary).await?;
        let payload = collect_result(stream, on_status).await?;
        into_service_result(payload)
    }

    /// Opens a generation stream at `path` with the summary as request body.
    async fn open_stream(&self, path: &str, summary: &str) -> Result<EventStream, IngestError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Opening generation stream");

        let response = self
            .client
            .post(&url)
            .header("Accept", "text/event-stream")
            .json(&json!({ "summary": summary }))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, "Failed to open generation stream");
                IngestError::Request(format!("Network error: {}", e))
            })?;

        let response = check_status(response).await?;
        Ok(EventStream::new(response))
    }
}

/// Fails fast on a non-success status so transport problems stay distinct
/// from streams that end without a result.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, IngestError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        error!(status = %status, message = %message, "Service returned error status");
        return Err(IngestError::HttpStatus { status: status.as_u16(), message });
    }
    Ok(response)
}

/// Converts a terminal payload reporting failure into a service error.
fn into_service_result(payload: CompletePayload) -> Result<CompletePayload, IngestError> {
    if payload.success {
        Ok(payload)
    } else {
        let message = payload
            .message
            .unwrap_or_else(|| "Generation failed".to_string());
        Err(IngestError::Service(message))
    }
}

fn detect_mime_type_from_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| match ext.to_lowercase().as_str() {
            "pdf" => "application/pdf",
            "docx" => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            "txt" => "text/plain",
            "md" => "text/markdown",
            _ => "application/octet-stream",
        })
        .unwrap_or("application/octet-stream")
        .to_string()
}
