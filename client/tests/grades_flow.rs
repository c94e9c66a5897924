//! Grades client against a mock backend.
//!
//! The backend envelope is awkward on purpose: the real payload is a
//! JSON-encoded string inside the `body` field. These tests pin that
//! double-decoding down, plus the error paths around it.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use gradedrop::{ClientError, GradesClient, GradesError, ValidationError};

#[derive(Default)]
struct Recorded {
    queries: Mutex<Vec<serde_json::Value>>,
}

async fn grades_handler(
    State(state): State<Arc<Recorded>>,
    Json(query): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let operation = query["operation"].as_str().unwrap_or("").to_string();
    state.queries.lock().unwrap().push(query);

    let inner = match operation.as_str() {
        "getSingleStudentGrade" => serde_json::json!({
            "summary": [{
                "student_id": "s42", "assignment_id": "A1", "total_marks": 17.5,
                "evaluation_id": "e1", "qp_id": "QP7", "timestamp": 1714000000
            }],
            "details": [{
                "question_number": 2, "subpart": "b", "marks": 4.0, "max_marks": 5.0,
                "question": "State the pumping lemma.",
                "student_answer": "For every regular language...",
                "feedback": "Correct up to the decomposition."
            }]
        }),
        "getAllStudentGrades" => serde_json::json!({
            "grades": [
                {"evaluation_id": "e1", "student_id": "s42", "qp_id": "QP7",
                 "total_marks": 17.5, "timestamp": 1714000000},
                {"evaluation_id": "e2", "student_id": "s43", "qp_id": "QP7",
                 "total_marks": 12.0, "timestamp": 1714000300}
            ]
        }),
        _ => serde_json::json!({"error": "unknown operation"}),
    };

    Json(serde_json::json!({ "body": inner.to_string() }))
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn start_grades_mock() -> (SocketAddr, Arc<Recorded>) {
    let state = Arc::new(Recorded::default());
    let app = Router::new()
        .route("/getgrades", post(grades_handler))
        .with_state(Arc::clone(&state));
    (serve(app).await, state)
}

#[tokio::test]
async fn single_student_decodes_summary_and_details() {
    let (addr, recorded) = start_grades_mock().await;
    let client = GradesClient::new(format!("http://{}/getgrades", addr));

    let grades = client.single_student("s42", "A1").await.unwrap();

    assert_eq!(grades.summary.len(), 1);
    assert_eq!(grades.summary[0].student_id.as_deref(), Some("s42"));
    assert_eq!(grades.summary[0].total_marks, Some(17.5));
    assert_eq!(grades.details.len(), 1);
    assert_eq!(grades.details[0].question_number, Some(2));

    // The request used the documented operation + identifying fields.
    let queries = recorded.queries.lock().unwrap();
    assert_eq!(queries[0]["operation"], "getSingleStudentGrade");
    assert_eq!(queries[0]["student_id"], "s42");
    assert_eq!(queries[0]["assignment_id"], "A1");
}

#[tokio::test]
async fn all_students_decodes_grade_rows() {
    let (addr, recorded) = start_grades_mock().await;
    let client = GradesClient::new(format!("http://{}/getgrades", addr));

    let rows = client.all_students("QP7", "A1").await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].evaluation_id.as_deref(), Some("e1"));
    assert_eq!(rows[1].total_marks, Some(12.0));

    let queries = recorded.queries.lock().unwrap();
    assert_eq!(queries[0]["operation"], "getAllStudentGrades");
    assert_eq!(queries[0]["qp_id"], "QP7");
}

#[tokio::test]
async fn missing_body_envelope_is_rejected() {
    async fn no_body() -> Json<serde_json::Value> {
        Json(serde_json::json!({ "statusCode": 200 }))
    }
    let addr = serve(Router::new().route("/getgrades", post(no_body))).await;

    let err = GradesClient::new(format!("http://{}/getgrades", addr))
        .single_student("s42", "A1")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Grades(GradesError::MissingBody)
    ));
    assert_eq!(err.to_string(), "Invalid response from server");
}

#[tokio::test]
async fn malformed_inner_body_is_parse_error() {
    async fn garbage_body() -> Json<serde_json::Value> {
        Json(serde_json::json!({ "body": "{not valid json" }))
    }
    let addr = serve(Router::new().route("/getgrades", post(garbage_body))).await;

    let err = GradesClient::new(format!("http://{}/getgrades", addr))
        .single_student("s42", "A1")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Grades(GradesError::Parse(_))));
}

#[tokio::test]
async fn http_error_status_is_surfaced() {
    async fn fail() -> impl IntoResponse {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom")
    }
    let addr = serve(Router::new().route("/getgrades", post(fail))).await;

    let err = GradesClient::new(format!("http://{}/getgrades", addr))
        .all_students("QP7", "A1")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! Status: 500");
}

#[tokio::test]
async fn empty_ids_fail_before_any_request() {
    // Port 9 is discard; nothing should ever connect anyway.
    let client = GradesClient::new("http://127.0.0.1:9/getgrades");

    let err = client.single_student("  ", "A1").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::MissingField("student_id"))
    ));

    let err = client.all_students("QP7", "").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::MissingField("assignment_id"))
    ));
}
