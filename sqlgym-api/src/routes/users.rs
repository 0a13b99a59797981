use actix_web::{get, post, put, web};
use bcrypt::{hash, DEFAULT_COST};

use sqlgym_db::models::user::{NewUser as NewUserData, User as UserData};

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::models::user::{User, UserInput};
use crate::{get_conn, AppState};

#[get("/users")]
pub async fn get_users(
    state: web::Data<AppState>,
    auth: AuthUser,
) -> Result<web::Json<Vec<User>>, ApiError> {
    auth.require_teacher()?;
    let mut conn = get_conn(&state.pool)?;
    Ok(web::Json(
        UserData::list_all(&mut conn)?
            .iter()
            .map(|u| User::from(u))
            .collect(),
    ))
}

#[post("/users")]
pub async fn create_user(
    state: web::Data<AppState>,
    auth: AuthUser,
    input: web::Json<UserInput>,
) -> Result<web::Json<User>, ApiError> {
    auth.require_teacher()?;
    let input = input.into_inner();
    let mut conn = get_conn(&state.pool)?;
    let new_user = NewUserData {
        email: input.email,
        hash_pwd: hash(&input.password, DEFAULT_COST)
            .map_err(|e| ApiError::Internal(e.to_string()))?,
        name: input.name,
        user_role: input.role.to_string(),
    };
    let created_user = new_user.create(&mut conn)?;
    Ok(web::Json(User::from(&created_user)))
}

#[put("/users/{id}/block")]
pub async fn block_user(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> Result<web::Json<User>, ApiError> {
    auth.require_teacher()?;
    set_blocked(&state, path.into_inner(), true)
}

#[put("/users/{id}/unblock")]
pub async fn unblock_user(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<i32>,
) -> Result<web::Json<User>, ApiError> {
    auth.require_teacher()?;
    set_blocked(&state, path.into_inner(), false)
}

fn set_blocked(state: &AppState, uid: i32, blocked: bool) -> Result<web::Json<User>, ApiError> {
    let mut conn = get_conn(&state.pool)?;
    let user = UserData::get(uid, &mut conn)?;
    user.update_blocked(blocked, &mut conn)?;
    let user = UserData::get(uid, &mut conn)?;
    Ok(web::Json(User::from(&user)))
}
