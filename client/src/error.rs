//! Error types for the gradedrop upload and grades flow.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ValidationError`] - Bad files or missing form fields; blocks submission
//! - [`PresignError`] - Presigned-URL request failures; aborts the batch
//! - [`UploadError`] - Per-file upload failures; isolated to that file
//! - [`GradesError`] - Grade fetch/decode failures
//! - [`ClientError`] - Top-level umbrella
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. A [`PresignError`]
//! fails the whole batch before any upload starts; an [`UploadError`]
//! never aborts sibling uploads.

use thiserror::Error;

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors from file and form-field validation.
///
/// All of these are user-correctable: pick a different file, fill in the
/// missing field, and resubmit.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Declared MIME type is not the allowed PDF type.
    #[error("File {0} is not a PDF")]
    NotPdf(String),

    /// File exceeds the configured size limit.
    #[error("File {name} exceeds maximum size of {limit_mb}MB")]
    TooLarge { name: String, limit_mb: u64 },

    /// Candidate file could not be inspected on disk.
    #[error("Failed to read file metadata for {name}: {source}")]
    Unreadable {
        name: String,
        source: std::io::Error,
    },

    /// Upload type was never chosen.
    #[error("Upload type is not set")]
    MissingUploadType,

    /// Upload type string is neither "student" nor "teacher".
    #[error("Invalid upload type '{0}' (expected 'student' or 'teacher')")]
    InvalidUploadType(String),

    /// Assignment ID is required for student uploads.
    #[error("Assignment ID is required for student uploads")]
    MissingAssignmentId,

    /// Submission attempted with an empty selection set.
    #[error("No files selected")]
    NoFilesSelected,

    /// A required identifying field is empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

// =============================================================================
// Presign Errors
// =============================================================================

/// Errors while requesting presigned upload URLs.
///
/// Any of these aborts the entire batch before a single byte is uploaded.
#[derive(Debug, Error)]
pub enum PresignError {
    /// Backend answered with a non-success HTTP status.
    #[error("Server error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Connection refused, DNS failure, timeout and friends.
    #[error("Failed to connect to server: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body was not the expected `{"urls": [...]}` shape.
    #[error("Failed to parse presign response: {0}")]
    InvalidResponse(String),

    /// Backend returned a URL list whose length does not match the
    /// number of files requested. The correlation is positional, so a
    /// mismatched list cannot be trusted at all.
    #[error("Presign response returned {got} URLs for {expected} files")]
    UrlCountMismatch { expected: usize, got: usize },
}

// =============================================================================
// Per-file Upload Errors
// =============================================================================

/// Failure of a single file's upload operation.
///
/// These never abort sibling uploads; they are collected into the final
/// [`crate::UploadReport`].
#[derive(Debug, Error)]
pub enum UploadError {
    /// The transfer did not finish within the configured timeout.
    /// Timeouts are never retried.
    #[error("Upload timed out")]
    Timeout,

    /// Storage answered outside [200, 300). Never retried.
    #[error("HTTP error {status}: {status_text}")]
    Status { status: u16, status_text: String },

    /// Transport-level send failures persisted through every retry.
    #[error("Upload failed after {retries} retries")]
    RetriesExhausted { retries: u32 },

    /// The local file could not be read.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Grades Errors
// =============================================================================

/// Errors while fetching or decoding grade data.
#[derive(Debug, Error)]
pub enum GradesError {
    /// Backend answered with a non-success HTTP status.
    #[error("HTTP error! Status: {0}")]
    Status(u16),

    /// Network-level failure.
    #[error("Grades request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Response envelope had no `body` field.
    #[error("Invalid response from server")]
    MissingBody,

    /// The `body` string did not decode to valid grade data.
    #[error("Failed to parse grade data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The decoded payload carried no rows of the expected kind.
    #[error("No {0} available")]
    NoData(&'static str),
}

// =============================================================================
// Client Errors (top-level)
// =============================================================================

/// Top-level error for the whole client flow.
///
/// This is what the CLI handles; it wraps every lower-level error.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Validation failed; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Presign call failed; batch aborted before any upload.
    #[error("{0}")]
    Presign(#[from] PresignError),

    /// A single file's upload failed.
    #[error("{0}")]
    Upload(#[from] UploadError),

    /// Grade fetch or decode failed.
    #[error("{0}")]
    Grades(#[from] GradesError),

    /// Some files in the batch failed while others succeeded.
    #[error("Upload completed with {failed} failed file(s) out of {total}")]
    PartialUpload { failed: usize, total: usize },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for presign operations.
pub type PresignResult<T> = Result<T, PresignError>;

/// Result type for per-file upload operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// Result type for grades operations.
pub type GradesResult<T> = Result<T, GradesError>;

/// Result type for the overall client flow.
pub type ClientResult<T> = Result<T, ClientError>;
