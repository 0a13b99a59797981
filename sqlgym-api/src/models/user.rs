use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use sqlgym_common::utils::Role;
use sqlgym_db::models::user::User as UserData;

#[derive(Debug, Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub is_blocked: bool,
    pub joined_at: NaiveDateTime,
    pub last_login_at: Option<NaiveDateTime>,
}

impl From<&UserData> for User {
    fn from(user: &UserData) -> Self {
        User {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: Role::from_str(&user.user_role)
                .expect(&format!("cannot convert {} to Role", &user.user_role)),
            is_blocked: user.is_blocked,
            joined_at: user.joined_at,
            last_login_at: user.last_login_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SignUpInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UserInput {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn role_text_converts_to_dto() {
        let data = UserData {
            id: 3,
            email: "ada@example.com".to_string(),
            hash_pwd: "$2b$12$hash".to_string(),
            name: "Ada".to_string(),
            user_role: "TEACHER".to_string(),
            is_blocked: false,
            joined_at: NaiveDate::from_ymd_opt(2025, 6, 10)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            last_login_at: None,
        };
        let dto = User::from(&data);
        assert_eq!(dto.role, Role::Teacher);
        assert_eq!(
            serde_json::to_value(&dto.role).unwrap(),
            serde_json::json!("TEACHER")
        );
    }

    #[test]
    fn role_input_parses_wire_format() {
        let input: UserInput = serde_json::from_str(
            "{\"email\":\"t@example.com\",\"name\":\"T\",\"password\":\"pw\",\"role\":\"TUTOR\"}",
        )
        .unwrap();
        assert_eq!(input.role, Role::Tutor);
    }
}
