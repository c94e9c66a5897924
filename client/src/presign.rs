//! Presigned-URL request client.
//!
//! One POST to the configured endpoint with the metadata payload; the
//! backend answers with `{"urls": [...]}`, one URL per requested file,
//! positionally aligned to the request's files array.

use crate::error::{PresignError, PresignResult};
use crate::types::{PresignResponse, UploadMetadata};

/// Client for the presign endpoint.
#[derive(Debug, Clone)]
pub struct PresignClient {
    endpoint: String,
    http: reqwest::Client,
}

impl PresignClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    /// Use a shared HTTP client (connection pooling across components).
    pub fn with_client(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    /// Request one presigned upload URL per file in the metadata.
    ///
    /// Fails the whole batch on a non-success status (carrying the status
    /// code and body text), on network failure, on a malformed response,
    /// and on a URL count that does not match the file count. The last
    /// check matters: correlation is positional, so a short or reordered
    /// list cannot be detected downstream.
    pub async fn request_urls(&self, metadata: &UploadMetadata) -> PresignResult<Vec<String>> {
        tracing::debug!(
            endpoint = %self.endpoint,
            files = metadata.files.len(),
            "requesting presigned URLs"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(metadata)
            .send()
            .await
            .map_err(PresignError::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(PresignError::Network)?;

        if !status.is_success() {
            return Err(PresignError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PresignResponse = serde_json::from_str(&body)
            .map_err(|e| PresignError::InvalidResponse(e.to_string()))?;

        if parsed.urls.len() != metadata.files.len() {
            return Err(PresignError::UrlCountMismatch {
                expected: metadata.files.len(),
                got: parsed.urls.len(),
            });
        }

        tracing::debug!(urls = parsed.urls.len(), "presign succeeded");
        Ok(parsed.urls)
    }
}
