//! Grades query client.
//!
//! Talks to the grades endpoint: a single POST whose `operation` field
//! selects the query. The backend wraps its real payload in an envelope —
//! the `body` field is a JSON-encoded *string* which itself decodes to
//! `{summary, details}` (single student) or `{grades}` (all students).
//! Absent row fields are tolerated and rendered as N/A by the caller.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, GradesError, GradesResult, ValidationError};

// =============================================================================
// Query (request) Types
// =============================================================================

/// A grades query, tagged by the backend's `operation` discriminator.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "operation")]
pub enum GradeQuery {
    /// One student's grades for one assignment.
    #[serde(rename = "getSingleStudentGrade")]
    SingleStudent {
        student_id: String,
        assignment_id: String,
    },
    /// Every student's grade for one question paper + assignment.
    #[serde(rename = "getAllStudentGrades")]
    AllStudents {
        qp_id: String,
        assignment_id: String,
    },
}

// =============================================================================
// Row (response) Types
// =============================================================================

/// One row of the single-student summary table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradeSummary {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub assignment_id: Option<String>,
    #[serde(default)]
    pub total_marks: Option<f64>,
    #[serde(default)]
    pub evaluation_id: Option<String>,
    #[serde(default)]
    pub qp_id: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// One row of the all-students table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradeRow {
    #[serde(default)]
    pub evaluation_id: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub qp_id: Option<String>,
    #[serde(default)]
    pub total_marks: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Per-question breakdown for a single student.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionDetail {
    #[serde(default)]
    pub question_number: Option<u32>,
    #[serde(default)]
    pub subpart: Option<String>,
    #[serde(default)]
    pub marks: Option<f64>,
    #[serde(default)]
    pub max_marks: Option<f64>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub student_answer: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Decoded single-student result: summary rows plus optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentGrades {
    pub summary: Vec<GradeSummary>,
    pub details: Vec<QuestionDetail>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SingleInner {
    #[serde(default)]
    summary: Option<Vec<GradeSummary>>,
    #[serde(default)]
    details: Option<Vec<QuestionDetail>>,
}

#[derive(Debug, Deserialize)]
struct AllInner {
    #[serde(default)]
    grades: Option<Vec<GradeRow>>,
}

// =============================================================================
// Client
// =============================================================================

/// Client for the grades endpoint.
#[derive(Debug, Clone)]
pub struct GradesClient {
    endpoint: String,
    http: reqwest::Client,
}

impl GradesClient {
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

    /// Fetch one student's grades for one assignment.
    pub async fn single_student(
        &self,
        student_id: &str,
        assignment_id: &str,
    ) -> Result<StudentGrades, ClientError> {
        let query = GradeQuery::SingleStudent {
            student_id: require(student_id, "student_id")?,
            assignment_id: require(assignment_id, "assignment_id")?,
        };
        let body = self.post_query(&query).await?;
        Ok(decode_student_grades(&body)?)
    }

    /// Fetch every student's grade for one question paper + assignment.
    pub async fn all_students(
        &self,
        qp_id: &str,
        assignment_id: &str,
    ) -> Result<Vec<GradeRow>, ClientError> {
        let query = GradeQuery::AllStudents {
            qp_id: require(qp_id, "qp_id")?,
            assignment_id: require(assignment_id, "assignment_id")?,
        };
        let body = self.post_query(&query).await?;
        Ok(decode_all_grades(&body)?)
    }

    /// POST the query and unwrap the `body` envelope string.
    async fn post_query(&self, query: &GradeQuery) -> GradesResult<String> {
        tracing::debug!(endpoint = %self.endpoint, "fetching grades");

        let response = self
            .http
            .post(&self.endpoint)
            .json(query)
            .send()
            .await
            .map_err(GradesError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GradesError::Status(status.as_u16()));
        }

        let envelope: Envelope = response.json().await.map_err(GradesError::Network)?;
        envelope.body.ok_or(GradesError::MissingBody)
    }
}

fn require(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Decode the inner `body` JSON of a single-student response.
pub fn decode_student_grades(body: &str) -> GradesResult<StudentGrades> {
    let inner: SingleInner = serde_json::from_str(body)?;
    let summary = inner.summary.ok_or(GradesError::NoData("summary"))?;
    Ok(StudentGrades {
        summary,
        // Details are optional; the summary renders without them.
        details: inner.details.unwrap_or_default(),
    })
}

/// Decode the inner `body` JSON of an all-students response.
pub fn decode_all_grades(body: &str) -> GradesResult<Vec<GradeRow>> {
    let inner: AllInner = serde_json::from_str(body)?;
    inner.grades.ok_or(GradesError::NoData("grades"))
}
