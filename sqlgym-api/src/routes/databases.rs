use actix_web::{delete, get, post, web, HttpResponse};

use sqlgym_db::models::sample_database::{
    NewSampleDatabase as NewDatabaseData, SampleDatabase as DatabaseData,
};

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::models::database::{Database, DatabaseInput};
use crate::{get_conn, AppState};

#[get("/databases")]
pub async fn get_databases(
    state: web::Data<AppState>,
    _auth: AuthUser,
) -> Result<web::Json<Vec<Database>>, ApiError> {
    let mut conn = get_conn(&state.pool)?;
    Ok(web::Json(
        DatabaseData::list_all(&mut conn)?
            .iter()
            .map(|d| Database::from(d))
            .collect(),
    ))
}

#[get("/databases/{id}")]
pub async fn get_database(
    state: web::Data<AppState>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<web::Json<Database>, ApiError> {
    let mut conn = get_conn(&state.pool)?;
    let database = DatabaseData::find(path.into_inner(), &mut conn)?;
    Ok(web::Json(Database::from(&database)))
}

// Names are unique; posting an existing name updates that database in place.
#[post("/databases")]
pub async fn create_database(
    state: web::Data<AppState>,
    auth: AuthUser,
    input: web::Json<DatabaseInput>,
) -> Result<web::Json<Database>, ApiError> {
    auth.require_author()?;
    let input = input.into_inner();
    if input.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }
    if input.schema_sql.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "schema_sql must not be empty".to_string(),
        ));
    }

    let mut conn = get_conn(&state.pool)?;
    let new_database = NewDatabaseData {
        name: input.name,
        schema_sql: input.schema_sql,
        seed_sql: input.seed_sql,
        author_id: Some(auth.id),
    };
    let database = new_database.create_or_update(&mut conn)?;
    Ok(web::Json(Database::from(&database)))
}

#[delete("/databases/{id}")]
pub async fn delete_database(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    auth.require_author()?;
    let mut conn = get_conn(&state.pool)?;
    let database = DatabaseData::find(path.into_inner(), &mut conn)?;
    database.delete(&mut conn)?;
    Ok(HttpResponse::NoContent().finish())
}
