//! Domain types shared across the upload flow.
//!
//! # Categories
//!
//! - **Selection Types** - files the user picked, before upload
//! - **Metadata Types** - the presign request payload
//! - **Presign Types** - the backend's URL response
//! - **Outcome Types** - per-file and aggregate upload results
//!
//! The wire format for the presign payload is camelCase; optional fields
//! are omitted entirely when unset because the backend distinguishes an
//! absent field from an empty string.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// =============================================================================
// Selection Types
// =============================================================================

/// A file accepted into the selection set.
///
/// Holds the on-disk path so the uploader can read the bytes later;
/// only [`FileInfo`] goes over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    /// File name (the path's final component). Unique within a selection.
    pub name: String,
    /// Declared MIME type, derived from the extension.
    pub mime_type: String,
    /// Size on disk in bytes.
    pub size_bytes: u64,
    /// Where to read the content from at upload time.
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn info(&self) -> FileInfo {
        FileInfo {
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            size: self.size_bytes,
        }
    }
}

// =============================================================================
// Metadata Types
// =============================================================================

/// Who is uploading, which drives which fields are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadType {
    Student,
    Teacher,
}

impl fmt::Display for UploadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadType::Student => write!(f, "student"),
            UploadType::Teacher => write!(f, "teacher"),
        }
    }
}

impl FromStr for UploadType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(UploadType::Student),
            "teacher" => Ok(UploadType::Teacher),
            other => Err(ValidationError::InvalidUploadType(other.to_string())),
        }
    }
}

/// Wire description of one file inside [`UploadMetadata`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
}

/// The presign request payload.
///
/// Built fresh per submission and immutable once sent. `course_id` and
/// `student_id` must be absent (not empty strings) when not provided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadata {
    pub upload_type: UploadType,
    pub assignment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    /// Ordered: presigned URLs come back positionally aligned to this.
    pub files: Vec<FileInfo>,
}

// =============================================================================
// Presign Types
// =============================================================================

/// Backend response to the presign request.
///
/// Invariant (positional contract): `urls[i]` is the upload target for
/// `files[i]` of the request.
#[derive(Debug, Clone, Deserialize)]
pub struct PresignResponse {
    pub urls: Vec<String>,
}

// =============================================================================
// Outcome Types
// =============================================================================

/// Result of one file's upload operation.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub file_name: String,
    pub success: bool,
    /// Failure message, when `success` is false.
    pub error: Option<String>,
}

impl UploadOutcome {
    pub fn success(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            success: true,
            error: None,
        }
    }

    pub fn failure(file_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Aggregate result of a batch upload.
///
/// Every file settles (success or failure) before this is produced; a
/// failing file never aborts its siblings.
#[derive(Debug, Clone)]
pub struct UploadReport {
    pub outcomes: Vec<UploadOutcome>,
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
}

impl UploadReport {
    /// True only if every file in the batch succeeded.
    pub fn is_complete_success(&self) -> bool {
        self.failed == 0 && self.completed == self.total
    }

    /// One-line human summary of the batch.
    pub fn summary(&self) -> String {
        if self.is_complete_success() {
            "All files uploaded successfully!".to_string()
        } else {
            format!(
                "Upload completed with {} failed file(s) out of {}",
                self.failed, self.total
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file(name: &str) -> FileInfo {
        FileInfo {
            name: name.to_string(),
            mime_type: "application/pdf".to_string(),
            size: 1024,
        }
    }

    #[test]
    fn test_metadata_omits_absent_optionals() {
        let metadata = UploadMetadata {
            upload_type: UploadType::Student,
            assignment_id: "A1".to_string(),
            course_id: None,
            student_id: None,
            files: vec![sample_file("hw.pdf")],
        };

        let json = serde_json::to_value(&metadata).unwrap();
        let object = json.as_object().unwrap();
        // Absent, not empty strings: the backend tells these apart.
        assert!(!object.contains_key("courseId"));
        assert!(!object.contains_key("studentId"));
        assert_eq!(json["uploadType"], "student");
        assert_eq!(json["assignmentId"], "A1");
    }

    #[test]
    fn test_metadata_wire_shape() {
        let metadata = UploadMetadata {
            upload_type: UploadType::Teacher,
            assignment_id: "A2".to_string(),
            course_id: Some("CS101".to_string()),
            student_id: None,
            files: vec![sample_file("exam.pdf")],
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["uploadType"], "teacher");
        assert_eq!(json["courseId"], "CS101");
        assert_eq!(json["files"][0]["name"], "exam.pdf");
        assert_eq!(json["files"][0]["type"], "application/pdf");
        assert_eq!(json["files"][0]["size"], 1024);
    }

    #[test]
    fn test_upload_type_round_trip() {
        assert_eq!("student".parse::<UploadType>().unwrap(), UploadType::Student);
        assert_eq!("Teacher".parse::<UploadType>().unwrap(), UploadType::Teacher);
        assert!("admin".parse::<UploadType>().is_err());
        assert_eq!(UploadType::Student.to_string(), "student");
    }

    #[test]
    fn test_presign_response_deserialization() {
        let json = r#"{"urls": ["https://bucket/a?sig=1", "https://bucket/b?sig=2"]}"#;
        let response: PresignResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.urls.len(), 2);
        assert!(response.urls[0].ends_with("sig=1"));
    }

    #[test]
    fn test_report_summary() {
        let report = UploadReport {
            outcomes: vec![
                UploadOutcome::success("a.pdf"),
                UploadOutcome::failure("b.pdf", "HTTP error 500: Internal Server Error"),
                UploadOutcome::success("c.pdf"),
            ],
            completed: 2,
            failed: 1,
            total: 3,
        };
        assert!(!report.is_complete_success());
        assert_eq!(
            report.summary(),
            "Upload completed with 1 failed file(s) out of 3"
        );
    }
}
