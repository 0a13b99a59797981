use actix_web::{delete, get, post, put, web, HttpResponse};

use sqlgym_db::models::exercise::{Exercise as ExerciseData, NewExercise as NewExerciseData};
use sqlgym_db::models::sample_database::SampleDatabase as DatabaseData;
use sqlgym_db::models::submission::Submission as SubmissionData;

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::models::exercise::{Exercise, ExerciseInput, ExerciseUpdateInput};
use crate::models::submission::Submission;
use crate::{get_conn, AppState};

#[get("/exercises")]
pub async fn get_exercises(
    state: web::Data<AppState>,
    auth: AuthUser,
) -> Result<web::Json<Vec<Exercise>>, ApiError> {
    let mut conn = get_conn(&state.pool)?;
    let include_solution = auth.is_author();
    Ok(web::Json(
        ExerciseData::list_all(&mut conn)?
            .iter()
            .map(|e| Exercise::from_data(e, include_solution))
            .collect(),
    ))
}

#[get("/exercises/{id}")]
pub async fn get_exercise(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> Result<web::Json<Exercise>, ApiError> {
    let mut conn = get_conn(&state.pool)?;
    let exercise = ExerciseData::find(path.into_inner(), &mut conn)?;
    Ok(web::Json(Exercise::from_data(&exercise, auth.is_author())))
}

#[post("/exercises")]
pub async fn create_exercise(
    state: web::Data<AppState>,
    auth: AuthUser,
    input: web::Json<ExerciseInput>,
) -> Result<web::Json<Exercise>, ApiError> {
    auth.require_author()?;
    let input = input.into_inner();
    if input.title.trim().is_empty() || input.solution_query.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "title and solution_query must not be empty".to_string(),
        ));
    }

    let mut conn = get_conn(&state.pool)?;
    // The referenced sample database must exist before anything is written.
    DatabaseData::find(input.database_id, &mut conn).map_err(|_| {
        ApiError::BadRequest(format!("database {} does not exist", input.database_id))
    })?;

    let new_exercise = NewExerciseData {
        title: input.title,
        description: input.description,
        initial_query: input.initial_query,
        solution_query: input.solution_query,
        database_id: input.database_id,
        author_id: Some(auth.id),
    };
    let exercise = new_exercise.create(&mut conn)?;
    Ok(web::Json(Exercise::from_data(&exercise, true)))
}

#[put("/exercises/{id}")]
pub async fn update_exercise(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<i32>,
    input: web::Json<ExerciseUpdateInput>,
) -> Result<web::Json<Exercise>, ApiError> {
    auth.require_author()?;
    let input = input.into_inner();
    let mut conn = get_conn(&state.pool)?;
    if let Some(database_id) = input.database_id {
        DatabaseData::find(database_id, &mut conn)
            .map_err(|_| ApiError::BadRequest(format!("database {} does not exist", database_id)))?;
    }
    let exercise = ExerciseData::find(path.into_inner(), &mut conn)?;
    let updated = exercise.update(&input.into(), &mut conn)?;
    Ok(web::Json(Exercise::from_data(&updated, true)))
}

#[delete("/exercises/{id}")]
pub async fn delete_exercise(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    auth.require_author()?;
    let mut conn = get_conn(&state.pool)?;
    let exercise = ExerciseData::find(path.into_inner(), &mut conn)?;
    exercise.delete(&mut conn)?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/exercises/{id}/submissions")]
pub async fn get_exercise_submissions(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> Result<web::Json<Vec<Submission>>, ApiError> {
    auth.require_author()?;
    let mut conn = get_conn(&state.pool)?;
    let exercise = ExerciseData::find(path.into_inner(), &mut conn)?;
    Ok(web::Json(
        SubmissionData::find_by_exercise(exercise.id, &mut conn)?
            .iter()
            .map(|s| Submission::from(s))
            .collect(),
    ))
}
