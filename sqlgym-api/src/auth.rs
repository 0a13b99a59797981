use std::future::{ready, Ready};
use std::str::FromStr;

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};

use sqlgym_common::utils::{decode_token, Role};

use crate::errors::ApiError;

/// The authenticated caller, extracted from the bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: i32,
    pub role: Role,
}

impl AuthUser {
    pub fn is_author(&self) -> bool {
        matches!(self.role, Role::Teacher | Role::Tutor)
    }

    /// Teachers and tutors may author databases and exercises.
    pub fn require_author(&self) -> Result<(), ApiError> {
        if self.is_author() {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }

    pub fn require_teacher(&self) -> Result<(), ApiError> {
        if self.role == Role::Teacher {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;
    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;
    let claims = decode_token(token).map_err(|_| ApiError::Unauthorized)?;
    let id = claims
        .sub
        .parse::<i32>()
        .map_err(|_| ApiError::Unauthorized)?;
    let role = Role::from_str(&claims.role).map_err(|_| ApiError::Unauthorized)?;
    Ok(AuthUser { id, role })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use sqlgym_common::utils::create_token;

    #[test]
    fn valid_bearer_token_authenticates() {
        let token = create_token("17".to_string(), Role::Tutor);
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();
        let user = authenticate(&req).unwrap();
        assert_eq!(user.id, 17);
        assert_eq!(user.role, Role::Tutor);
        assert!(user.is_author());
        assert!(user.require_teacher().is_err());
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            authenticate(&req),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(matches!(
            authenticate(&req),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer not.a.token"))
            .to_http_request();
        assert!(matches!(
            authenticate(&req),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn student_is_not_an_author() {
        let user = AuthUser {
            id: 1,
            role: Role::Student,
        };
        assert!(user.require_author().is_err());
    }
}
