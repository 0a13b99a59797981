use std::str::FromStr;

use actix_web::{post, web};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;

use sqlgym_common::utils::{create_token, Role};
use sqlgym_db::models::user::{NewUser as NewUserData, User as UserData};

use crate::errors::ApiError;
use crate::models::user::{SignInInput, SignUpInput, TokenResponse, User};
use crate::{get_conn, AppState};

#[post("/auth/signup")]
pub async fn sign_up(
    state: web::Data<AppState>,
    input: web::Json<SignUpInput>,
) -> Result<web::Json<User>, ApiError> {
    let input = input.into_inner();
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(ApiError::BadRequest(
            "email and password must not be empty".to_string(),
        ));
    }

    let mut conn = get_conn(&state.pool)?;
    let new_user = NewUserData {
        email: input.email,
        hash_pwd: hash(&input.password, DEFAULT_COST)
            .map_err(|e| ApiError::Internal(e.to_string()))?,
        name: input.name,
        user_role: Role::Student.to_string(),
    };
    let created_user = new_user.create(&mut conn)?;
    Ok(web::Json(User::from(&created_user)))
}

#[post("/auth/signin")]
pub async fn sign_in(
    state: web::Data<AppState>,
    input: web::Json<SignInInput>,
) -> Result<web::Json<TokenResponse>, ApiError> {
    let input = input.into_inner();
    let mut conn = get_conn(&state.pool)?;

    let user = UserData::get_by_email(&input.email, &mut conn).map_err(|_| ApiError::Unauthorized)?;
    if !verify(&input.password, &user.hash_pwd).map_err(|e| ApiError::Internal(e.to_string()))? {
        return Err(ApiError::Unauthorized);
    }
    if user.is_blocked {
        return Err(ApiError::Forbidden);
    }

    let role = Role::from_str(&user.user_role).expect("Can't convert user_role to Role");
    user.update_last_login(Utc::now().naive_utc(), &mut conn)?;
    Ok(web::Json(TokenResponse {
        token: create_token(user.id.to_string(), role),
    }))
}
