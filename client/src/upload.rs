//! Parallel upload of selected files to their presigned URLs.
//!
//! One PUT per file, all in flight at once, each with its own timeout and
//! retry budget. A failing file never aborts its siblings: the batch waits
//! for every operation to settle and reports aggregate counts.
//!
//! Retry policy (matching the backend's expectations):
//!
//! - transport-level send failure: retried up to `max_retries` times with
//!   `retry_delay` between attempts
//! - timeout: fails immediately, no retry
//! - any HTTP status outside [200, 300): fails immediately, no retry

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use futures::future;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};

use crate::config::UploadConfig;
use crate::error::UploadError;
use crate::progress::ProgressEvents;
use crate::types::{SelectedFile, UploadOutcome, UploadReport};

/// Upload body chunk size; small enough for useful progress granularity.
const CHUNK_SIZE: usize = 64 * 1024;

/// How a single PUT attempt ended, before retry policy is applied.
enum AttemptError {
    Timeout,
    Status { status: u16, status_text: String },
    Transport(reqwest::Error),
}

/// Issues the per-file PUTs for a batch.
#[derive(Debug, Clone)]
pub struct Uploader {
    config: UploadConfig,
    http: reqwest::Client,
}

impl Uploader {
    pub fn new(config: UploadConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Use a shared HTTP client (connection pooling across components).
    pub fn with_client(config: UploadConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Upload every file to its positionally-aligned URL.
    ///
    /// `files` and `urls` must be the same length; [`crate::PresignClient`]
    /// guarantees that before any upload starts. All transfers run
    /// concurrently and the call returns only once every one has settled.
    /// There is no cancellation: a failure marks that file and the rest
    /// keep going.
    pub async fn upload_all(
        &self,
        files: &[SelectedFile],
        urls: &[String],
        progress: Arc<dyn ProgressEvents>,
    ) -> UploadReport {
        debug_assert_eq!(files.len(), urls.len());
        let total = files.len();
        let completed = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);

        let tasks = files.iter().zip(urls.iter()).enumerate().map(|(index, (file, url))| {
            let progress = Arc::clone(&progress);
            let completed = &completed;
            let failed = &failed;
            async move {
                let outcome = match self.upload_one(index, file, url, &progress).await {
                    Ok(()) => UploadOutcome::success(file.name.clone()),
                    Err(e) => UploadOutcome::failure(file.name.clone(), e.to_string()),
                };

                if outcome.success {
                    completed.fetch_add(1, Ordering::SeqCst);
                } else {
                    failed.fetch_add(1, Ordering::SeqCst);
                }
                progress.file_finished(index, &file.name, &outcome);
                progress.batch_progress(
                    completed.load(Ordering::SeqCst),
                    failed.load(Ordering::SeqCst),
                    total,
                );
                outcome
            }
        });

        let outcomes = future::join_all(tasks).await;

        let report = UploadReport {
            outcomes,
            completed: completed.load(Ordering::SeqCst),
            failed: failed.load(Ordering::SeqCst),
            total,
        };
        tracing::info!(
            completed = report.completed,
            failed = report.failed,
            total = report.total,
            "batch settled"
        );
        report
    }

    /// Run one file to settlement, applying the retry policy.
    async fn upload_one(
        &self,
        index: usize,
        file: &SelectedFile,
        url: &str,
        progress: &Arc<dyn ProgressEvents>,
    ) -> Result<(), UploadError> {
        let data = Bytes::from(tokio::fs::read(&file.path).await?);

        let mut attempt: u32 = 0;
        loop {
            match self.try_put(index, file, url, data.clone(), progress).await {
                Ok(()) => return Ok(()),
                Err(AttemptError::Timeout) => return Err(UploadError::Timeout),
                Err(AttemptError::Status { status, status_text }) => {
                    return Err(UploadError::Status { status, status_text });
                }
                Err(AttemptError::Transport(e)) => {
                    if attempt >= self.config.max_retries {
                        return Err(UploadError::RetriesExhausted {
                            retries: self.config.max_retries,
                        });
                    }
                    attempt += 1;
                    tracing::warn!(
                        name = %file.name,
                        attempt,
                        max_retries = self.config.max_retries,
                        error = %e,
                        "send failed, retrying"
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
            }
        }
    }

    /// One PUT attempt with a progress-counting body.
    async fn try_put(
        &self,
        index: usize,
        file: &SelectedFile,
        url: &str,
        data: Bytes,
        progress: &Arc<dyn ProgressEvents>,
    ) -> Result<(), AttemptError> {
        let total_bytes = data.len();
        let stream = progress_stream(data, index, file.name.clone(), Arc::clone(progress));

        let result = self
            .http
            .put(url)
            .header(CONTENT_TYPE, &file.mime_type)
            .header(CONTENT_LENGTH, total_bytes)
            .timeout(self.config.timeout)
            .body(reqwest::Body::wrap_stream(stream))
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    Ok(())
                } else {
                    Err(AttemptError::Status {
                        status: status.as_u16(),
                        status_text: status
                            .canonical_reason()
                            .unwrap_or("Unknown")
                            .to_string(),
                    })
                }
            }
            Err(e) if e.is_timeout() => Err(AttemptError::Timeout),
            Err(e) => Err(AttemptError::Transport(e)),
        }
    }
}

/// Chunked body stream that reports percent milestones as bytes are
/// handed to the transport. The size is known up front, so percentages
/// are exact.
fn progress_stream(
    data: Bytes,
    index: usize,
    name: String,
    progress: Arc<dyn ProgressEvents>,
) -> impl futures::Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static {
    let total = data.len();
    let chunks: Vec<Bytes> = (0..total)
        .step_by(CHUNK_SIZE)
        .map(|start| data.slice(start..total.min(start + CHUNK_SIZE)))
        .collect();

    let mut sent = 0usize;
    let mut last_percent = 0u8;
    futures::stream::iter(chunks.into_iter().map(move |chunk| {
        sent += chunk.len();
        let percent = transfer_percent(sent, total);
        if percent != last_percent {
            last_percent = percent;
            progress.file_progress(index, &name, percent);
        }
        Ok(chunk)
    }))
}

/// Rounded transfer percent; an empty body counts as fully sent.
fn transfer_percent(sent: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((sent as f64 / total as f64) * 100.0).round() as u8
}
