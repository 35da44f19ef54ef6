//! Librarian account model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::PHONE_RE;

/// Full librarian model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Librarian {
    pub id: i32,
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birthdate: NaiveDate,
    pub age: i32,
    pub employment_date: NaiveDate,
    pub shift: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
}

/// Librarian registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterLibrarian {
    #[validate(length(min = 1, max = 20, message = "Employee id is required"))]
    pub employee_id: String,
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    pub phone: String,
    pub birthdate: NaiveDate,
    pub employment_date: NaiveDate,
    #[validate(length(min = 1, max = 100, message = "Shift is required"))]
    pub shift: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn registration_requires_employee_id() {
        let r = RegisterLibrarian {
            employee_id: "".into(),
            name: "Alice Admin".into(),
            email: "alice@library.com".into(),
            phone: "9991112222".into(),
            birthdate: NaiveDate::from_ymd_opt(1985, 6, 10).unwrap(),
            employment_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            shift: "9am-5pm".into(),
            password: "lib123456".into(),
        };
        assert!(r.validate().unwrap_err().field_errors().contains_key("employee_id"));
    }
}
