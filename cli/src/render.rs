//! Grade table rendering.
//!
//! Turns decoded grade rows into aligned text tables on stdout. Absent
//! fields render as `N/A`; timestamps are unix seconds rendered in UTC.

use gradedrop::{GradeRow, GradeSummary, QuestionDetail};

pub fn render_summary(rows: &[GradeSummary]) {
    println!("📋 Grade summary ({} row(s)):\n", rows.len());
    println!(
        "{:<12} {:<14} {:<8} {:<14} {:<10} {}",
        "Student", "Assignment", "Marks", "Evaluation", "QP", "Date"
    );
    for row in rows {
        println!(
            "{:<12} {:<14} {:<8} {:<14} {:<10} {}",
            na(&row.student_id),
            na(&row.assignment_id),
            marks(row.total_marks),
            na(&row.evaluation_id),
            na(&row.qp_id),
            format_timestamp(row.timestamp)
        );
    }
}

pub fn render_details(details: &[QuestionDetail]) {
    println!("\n📝 Question details:\n");
    for question in details {
        let number = question
            .question_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        match &question.subpart {
            Some(subpart) => println!("Question {} ({})", number, subpart),
            None => println!("Question {}", number),
        }
        println!("   Marks: {} / {}", marks(question.marks), marks(question.max_marks));
        println!(
            "   {}",
            question.question.as_deref().unwrap_or("Question not available")
        );
        println!(
            "   Your answer: {}",
            question
                .student_answer
                .as_deref()
                .unwrap_or("No answer provided")
        );
        println!(
            "   Feedback: {}",
            question
                .feedback
                .as_deref()
                .unwrap_or("No additional feedback provided")
        );
        println!();
    }
}

pub fn render_all_students(rows: &[GradeRow]) {
    println!("📋 All student grades ({} row(s)):\n", rows.len());
    println!(
        "{:<14} {:<12} {:<10} {:<8} {}",
        "Evaluation", "Student", "QP", "Marks", "Date"
    );
    for row in rows {
        println!(
            "{:<14} {:<12} {:<10} {:<8} {}",
            na(&row.evaluation_id),
            na(&row.student_id),
            na(&row.qp_id),
            marks(row.total_marks),
            format_timestamp(row.timestamp)
        );
    }
}

fn na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

fn marks(value: Option<f64>) -> String {
    match value {
        Some(m) => format!("{}", m),
        None => "N/A".to_string(),
    }
}

fn format_timestamp(timestamp: Option<i64>) -> String {
    timestamp
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        // 2024-04-24 22:26:40 UTC
        assert_eq!(format_timestamp(Some(1713997600)), "2024-04-24 22:26:40 UTC");
        assert_eq!(format_timestamp(None), "N/A");
    }

    #[test]
    fn test_marks_renders_na() {
        assert_eq!(marks(Some(17.5)), "17.5");
        assert_eq!(marks(Some(20.0)), "20");
        assert_eq!(marks(None), "N/A");
    }
}
