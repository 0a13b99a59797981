use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use sqlgym_db::models::submission::Submission as SubmissionData;
use sqlgym_grader::{Feedback, ResultSet};

#[derive(Debug, Serialize)]
pub struct Submission {
    pub id: i32,
    pub query: String,
    pub is_correct: bool,
    pub feedback: String,
    pub student_id: i32,
    pub exercise_id: i32,
    pub created_at: NaiveDateTime,
}

impl From<&SubmissionData> for Submission {
    fn from(data: &SubmissionData) -> Self {
        Submission {
            id: data.id,
            query: data.query.clone(),
            is_correct: data.is_correct,
            feedback: data.feedback.clone(),
            student_id: data.student_id,
            exercise_id: data.exercise_id,
            created_at: data.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmissionInput {
    pub exercise_id: i32,
    pub query: String,
}

/// The student's rows, rendered as plain JSON for the result grid.
#[derive(Debug, Serialize)]
pub struct ResultPreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl From<&ResultSet> for ResultPreview {
    fn from(result: &ResultSet) -> Self {
        ResultPreview {
            columns: result.columns.clone(),
            rows: result
                .rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_json()).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GradeReport {
    pub submission: Submission,
    pub feedback: Feedback,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultPreview>,
}
