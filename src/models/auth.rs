//! Authentication types: the role enum and JWT claims

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Account role. Every token carries exactly one of these; route-level
/// authorization is an exhaustive match on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Librarian,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Librarian => "librarian",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JWT claims for authenticated accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Email the account authenticated with
    pub sub: String,
    /// Row id in the role's account table
    pub subject_id: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: String, subject_id: i32, role: Role, issued_at: i64, ttl_hours: u64) -> Self {
        Self {
            sub,
            subject_id,
            role,
            exp: issued_at + (ttl_hours as i64 * 3600),
            iat: issued_at,
        }
    }

    /// Sign the claims into a bearer token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Decode and verify a bearer token (signature and expiry)
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Require the student role; returns the student id
    pub fn require_student(&self) -> AppResult<i32> {
        match self.role {
            Role::Student => Ok(self.subject_id),
            Role::Librarian => Err(AppError::Authorization("Students only".to_string())),
        }
    }

    /// Require the librarian role; returns the librarian id
    pub fn require_librarian(&self) -> AppResult<i32> {
        match self.role {
            Role::Librarian => Ok(self.subject_id),
            Role::Student => Err(AppError::Authorization("Librarians only".to_string())),
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token response returned by login and registration
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip_preserves_claims() {
        let claims = Claims::new("jane@example.com".into(), 7, Role::Student, Utc::now().timestamp(), 24);
        let token = claims.create_token(SECRET).unwrap();
        let decoded = Claims::from_token(&token, SECRET).unwrap();
        assert_eq!(decoded.subject_id, 7);
        assert_eq!(decoded.role, Role::Student);
        assert_eq!(decoded.sub, "jane@example.com");
    }

    #[test]
    fn expired_token_is_rejected() {
        let issued = Utc::now().timestamp() - 7200;
        let claims = Claims {
            sub: "old@example.com".into(),
            subject_id: 1,
            role: Role::Student,
            exp: issued + 60,
            iat: issued,
        };
        let token = claims.create_token(SECRET).unwrap();
        assert!(Claims::from_token(&token, SECRET).is_err());
    }

    #[test]
    fn tampered_secret_is_rejected() {
        let claims = Claims::new("a@b.com".into(), 1, Role::Librarian, Utc::now().timestamp(), 24);
        let token = claims.create_token(SECRET).unwrap();
        assert!(Claims::from_token(&token, "other-secret").is_err());
    }

    #[test]
    fn role_gates_are_exhaustive() {
        let student = Claims::new("s@x.com".into(), 3, Role::Student, Utc::now().timestamp(), 24);
        assert_eq!(student.require_student().unwrap(), 3);
        assert!(student.require_librarian().is_err());

        let librarian = Claims::new("l@x.com".into(), 9, Role::Librarian, Utc::now().timestamp(), 24);
        assert_eq!(librarian.require_librarian().unwrap(), 9);
        assert!(librarian.require_student().is_err());
    }
}
