use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum_macros::*;

lazy_static! {
    static ref JWT_SECRET: String =
        std::env::var("JWT_SECRET").unwrap_or_else(|_| "sqlgym-dev-secret".to_string());
}

const TOKEN_LIFETIME_HOURS: i64 = 24;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Teacher,
    Tutor,
    Student,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
}

pub fn create_token(sub: String, role: Role) -> String {
    let exp = Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS);
    let claims = Claims {
        sub,
        role: role.to_string(),
        exp: exp.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("Can't create token")
}

pub fn decode_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn token_round_trip() {
        let token = create_token("42".to_string(), Role::Student);
        let claims = decode_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "STUDENT");
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = create_token("42".to_string(), Role::Teacher);
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'a' { b'b' } else { b'a' };
        let tampered = String::from_utf8(bytes).unwrap();
        assert!(decode_token(&tampered).is_err());
    }

    #[test]
    fn role_screaming_snake_case() {
        assert_eq!(Role::Teacher.to_string(), "TEACHER");
        assert_eq!(Role::from_str("TUTOR").unwrap(), Role::Tutor);
        assert!(Role::from_str("tutor").is_err());
    }
}
