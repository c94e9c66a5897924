//! # gradedrop - assignment upload and grades client
//!
//! Gradedrop collects PDF files, asks the backend for presigned upload
//! URLs, uploads every file directly to object storage in parallel, and
//! can fetch grade data for rendering.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐    ┌───────────────┐    ┌───────────────┐    ┌────────────────┐
//! │  Selection │───▶│  Metadata     │───▶│  Presign      │───▶│  Uploader      │
//! │ (validate) │    │  (build JSON) │    │  (POST, URLs) │    │ (parallel PUT) │
//! └────────────┘    └───────────────┘    └───────────────┘    └────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gradedrop::{
//!     Config, FileSelection, MetadataBuilder, NullProgress, PresignClient,
//!     Uploader, UploadType,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env();
//!     let mut selection = FileSelection::new(config.upload.clone());
//!     selection.add_path("hw1.pdf".as_ref()).unwrap();
//!
//!     let metadata = MetadataBuilder::new()
//!         .upload_type(UploadType::Student)
//!         .assignment_id("A1")
//!         .build(&selection)
//!         .unwrap();
//!
//!     let urls = PresignClient::new(config.api.upload_endpoint)
//!         .request_urls(&metadata)
//!         .await
//!         .unwrap();
//!
//!     let report = Uploader::new(config.upload)
//!         .upload_all(selection.files(), &urls, Arc::new(NullProgress))
//!         .await;
//!     println!("{}", report.summary());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Explicit configuration (no ambient state)
//! - [`types`] - Domain types and wire payloads
//! - [`selection`] - Validated file selection set
//! - [`metadata`] - Presign payload builder
//! - [`presign`] - Presigned-URL request client
//! - [`upload`] - Parallel uploader with retry and timeout
//! - [`progress`] - Progress event interface
//! - [`grades`] - Grades query client

// Core modules
pub mod config;
pub mod error;
pub mod types;

// Upload flow
pub mod metadata;
pub mod presign;
pub mod progress;
pub mod selection;
pub mod upload;

// Grades
pub mod grades;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ClientError,
    ClientResult,
    GradesError,
    PresignError,
    UploadError,
    ValidationError,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{ApiConfig, Config, UploadConfig, ALLOWED_FILE_TYPE, MAX_FILE_SIZE_MB};

// =============================================================================
// Re-exports - Types
// =============================================================================

pub use types::{
    FileInfo,
    PresignResponse,
    SelectedFile,
    UploadMetadata,
    UploadOutcome,
    UploadReport,
    UploadType,
};

// =============================================================================
// Re-exports - Upload flow
// =============================================================================

pub use metadata::MetadataBuilder;
pub use presign::PresignClient;
pub use progress::{overall_percent, NullProgress, ProgressEvents};
pub use selection::{Added, FileSelection};
pub use upload::Uploader;

// =============================================================================
// Re-exports - Grades
// =============================================================================

pub use grades::{
    decode_all_grades,
    decode_student_grades,
    GradeQuery,
    GradeRow,
    GradeSummary,
    GradesClient,
    QuestionDetail,
    StudentGrades,
};
