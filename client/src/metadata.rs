//! Builds the presign request payload from form fields and the selection.
//!
//! The builder mirrors the submission form: upload type, assignment ID,
//! and the optional course/student IDs, exactly as the user typed them.
//! [`MetadataBuilder::build`] enforces what the backend requires and
//! strips empty optionals so they are absent from the payload entirely.

use crate::error::{ValidationError, ValidationResult};
use crate::selection::FileSelection;
use crate::types::{UploadMetadata, UploadType};

/// Collects form-field values and produces an [`UploadMetadata`].
#[derive(Debug, Clone, Default)]
pub struct MetadataBuilder {
    upload_type: Option<UploadType>,
    assignment_id: String,
    course_id: String,
    student_id: String,
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_type(mut self, upload_type: UploadType) -> Self {
        self.upload_type = Some(upload_type);
        self
    }

    pub fn assignment_id(mut self, id: impl Into<String>) -> Self {
        self.assignment_id = id.into();
        self
    }

    pub fn course_id(mut self, id: impl Into<String>) -> Self {
        self.course_id = id.into();
        self
    }

    pub fn student_id(mut self, id: impl Into<String>) -> Self {
        self.student_id = id.into();
        self
    }

    /// Validate the form state and assemble the payload.
    ///
    /// Fails when the upload type is unset, when a student upload has no
    /// assignment ID, or when the selection is empty. Files are emitted
    /// in selection order; the presign response is aligned to it.
    pub fn build(&self, selection: &FileSelection) -> ValidationResult<UploadMetadata> {
        let upload_type = self
            .upload_type
            .ok_or(ValidationError::MissingUploadType)?;

        let assignment_id = self.assignment_id.trim().to_string();
        if upload_type == UploadType::Student && assignment_id.is_empty() {
            return Err(ValidationError::MissingAssignmentId);
        }

        if selection.is_empty() {
            return Err(ValidationError::NoFilesSelected);
        }

        Ok(UploadMetadata {
            upload_type,
            assignment_id,
            course_id: non_empty(&self.course_id),
            student_id: non_empty(&self.student_id),
            files: selection.files().iter().map(|f| f.info()).collect(),
        })
    }
}

/// Empty or whitespace-only form inputs count as absent.
fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
