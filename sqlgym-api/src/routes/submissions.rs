use actix_web::{get, post, web};

use sqlgym_db::models::submission::{
    NewSubmission as NewSubmissionData, Submission as SubmissionData,
};
use sqlgym_grader::{grade, FeedbackContext};

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::models::submission::{GradeReport, ResultPreview, Submission, SubmissionInput};
use crate::{get_conn, AppState};

/// Grades a submission: run the student and reference queries in fresh
/// sandboxes, compare, generate feedback, persist the attempt.
#[post("/submissions")]
pub async fn create_submission(
    state: web::Data<AppState>,
    auth: AuthUser,
    input: web::Json<SubmissionInput>,
) -> Result<web::Json<GradeReport>, ApiError> {
    let input = input.into_inner();
    let submitted = input.query.trim().to_string();
    if submitted.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let pool = state.pool.clone();
    let exercise_id = input.exercise_id;
    let (exercise, database) = web::block(move || -> Result<_, ApiError> {
        let mut conn = get_conn(&pool)?;
        let exercise = sqlgym_db::models::exercise::Exercise::find(exercise_id, &mut conn)?;
        let database = exercise.get_database(&mut conn)?;
        Ok((exercise, database))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    // Two engine runs; keep them off the async workers.
    let schema_sql = database.schema_sql.clone();
    let seed_sql = database.seed_sql.clone();
    let solution_query = exercise.solution_query.clone();
    let student_query = submitted.clone();
    let outcome = web::block(move || {
        grade(&schema_sql, &seed_sql, &solution_query, &student_query)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    let ctx = FeedbackContext {
        exercise_title: &exercise.title,
        exercise_description: &exercise.description,
        solution_query: &exercise.solution_query,
        submitted_query: &submitted,
        is_correct: outcome.is_correct,
        error_message: outcome.error_message.as_deref(),
        student_result: outcome.student_result.as_ref(),
        expected_result: outcome.expected_result.as_ref(),
    };
    let feedback = state.feedback.generate(&ctx).await;

    let pool = state.pool.clone();
    let new_submission = NewSubmissionData {
        query: submitted,
        is_correct: outcome.is_correct,
        feedback: feedback.feedback.clone(),
        student_id: auth.id,
        exercise_id: exercise.id,
    };
    let saved = web::block(move || -> Result<_, ApiError> {
        let mut conn = get_conn(&pool)?;
        Ok(new_submission.create(&mut conn)?)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(web::Json(GradeReport {
        submission: Submission::from(&saved),
        feedback,
        result: outcome.student_result.as_ref().map(ResultPreview::from),
    }))
}

#[get("/submissions/mine")]
pub async fn my_submissions(
    state: web::Data<AppState>,
    auth: AuthUser,
) -> Result<web::Json<Vec<Submission>>, ApiError> {
    let mut conn = get_conn(&state.pool)?;
    Ok(web::Json(
        SubmissionData::find_by_student(auth.id, &mut conn)?
            .iter()
            .map(|s| Submission::from(s))
            .collect(),
    ))
}
