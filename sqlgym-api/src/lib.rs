use actix_web::web;

use sqlgym_db::connection::{Conn, PgPool};
use sqlgym_grader::FeedbackGenerator;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub feedback: FeedbackGenerator,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        AppState {
            pool,
            feedback: FeedbackGenerator::from_env(),
        }
    }
}

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::auth::sign_up)
        .service(routes::auth::sign_in)
        .service(routes::users::get_users)
        .service(routes::users::create_user)
        .service(routes::users::block_user)
        .service(routes::users::unblock_user)
        .service(routes::databases::get_databases)
        .service(routes::databases::get_database)
        .service(routes::databases::create_database)
        .service(routes::databases::delete_database)
        .service(routes::exercises::get_exercises)
        .service(routes::exercises::get_exercise_submissions)
        .service(routes::exercises::get_exercise)
        .service(routes::exercises::create_exercise)
        .service(routes::exercises::update_exercise)
        .service(routes::exercises::delete_exercise)
        .service(routes::submissions::create_submission)
        .service(routes::submissions::my_submissions);
}

pub fn get_conn(pool: &PgPool) -> Result<Conn, ApiError> {
    pool.get().map_err(|e| ApiError::Internal(e.to_string()))
}

pub mod auth;
pub mod errors;
pub mod models;
pub mod routes;
