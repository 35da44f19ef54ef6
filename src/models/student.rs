//! Student account model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use super::PHONE_RE;

/// Membership tier for student accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    Basic,
    Premium,
}

impl MembershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipType::Basic => "basic",
            MembershipType::Premium => "premium",
        }
    }
}

impl std::fmt::Display for MembershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MembershipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(MembershipType::Basic),
            "premium" => Ok(MembershipType::Premium),
            _ => Err(format!("Invalid membership type: {}", s)),
        }
    }
}

// Stored as TEXT in Postgres
impl sqlx::Type<Postgres> for MembershipType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for MembershipType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for MembershipType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Full student model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i32,
    pub roll_no: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birthdate: NaiveDate,
    /// Age in full years, derived from birthdate at registration
    pub age: i32,
    pub membership_type: MembershipType,
    pub registration_date: DateTime<Utc>,
    pub total_books_issued: i32,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
}

/// Student registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterStudent {
    #[validate(length(min = 1, max = 20, message = "Roll number is required"))]
    pub roll_no: String,
    #[validate(length(min = 1, max = 50, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    pub phone: String,
    pub birthdate: NaiveDate,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Librarian-side student update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudent {
    #[validate(length(min = 1, max = 50, message = "First name must not be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Last name must not be empty"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    pub phone: Option<String>,
    pub membership_type: Option<MembershipType>,
}

/// Self-service profile update, valid for either role
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfile {
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    pub phone: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_registration() -> RegisterStudent {
        RegisterStudent {
            roll_no: "STU001".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@example.com".into(),
            phone: "9876543210".into(),
            birthdate: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            password: "student123".into(),
        }
    }

    #[test]
    fn registration_accepts_valid_input() {
        assert!(valid_registration().validate().is_ok());
    }

    #[test]
    fn registration_rejects_bad_email_and_short_password() {
        let mut r = valid_registration();
        r.email = "not-an-email".into();
        r.password = "short".into();
        let errs = r.validate().unwrap_err();
        let fields = errs.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn registration_rejects_bad_phone() {
        let mut r = valid_registration();
        r.phone = "call me".into();
        assert!(r.validate().is_err());
    }

    #[test]
    fn membership_type_parses_from_text() {
        assert_eq!("basic".parse::<MembershipType>().unwrap(), MembershipType::Basic);
        assert_eq!("PREMIUM".parse::<MembershipType>().unwrap(), MembershipType::Premium);
        assert!("gold".parse::<MembershipType>().is_err());
    }
}
