//! Fine model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

/// Payment state of a fine. The only transition is unpaid -> paid;
/// soft deletion is an orthogonal flag (`deleted_at`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

// Stored as TEXT in Postgres
impl sqlx::Type<Postgres> for PaymentStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for PaymentStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for PaymentStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Fine row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Fine {
    pub id: i32,
    pub student_id: i32,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub reason: String,
    pub payment_status: PaymentStatus,
    pub issued_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    /// Soft-delete marker; a deleted fine is hidden from default listings
    /// but the row is retained for financial history.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Fine with student context for the librarian listing
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FineOverview {
    pub id: i32,
    pub student_id: i32,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub reason: String,
    pub payment_status: PaymentStatus,
    pub issued_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub roll_no: String,
    pub student_name: String,
}

fn amount_not_negative(amount: &Decimal) -> Result<(), validator::ValidationError> {
    if amount.is_sign_negative() {
        let mut err = validator::ValidationError::new("amount");
        err.message = Some("Fine amount must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Issue-fine request; exactly one of `student_id` / `roll_no` identifies
/// the student (roll numbers are resolved server-side).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IssueFine {
    pub student_id: Option<i32>,
    pub roll_no: Option<String>,
    #[validate(custom(function = amount_not_negative))]
    #[schema(value_type = String)]
    pub amount: Decimal,
    #[validate(length(min = 1, max = 200, message = "Reason is required"))]
    pub reason: String,
}

/// Pay-fine request
#[derive(Debug, Deserialize, ToSchema)]
pub struct PayFine {
    pub fine_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn issue_fine_rejects_negative_amount() {
        let fine = IssueFine {
            student_id: Some(1),
            roll_no: None,
            amount: Decimal::new(-500, 2),
            reason: "Late return".into(),
        };
        assert!(fine.validate().unwrap_err().field_errors().contains_key("amount"));
    }

    #[test]
    fn issue_fine_accepts_zero_amount() {
        let fine = IssueFine {
            student_id: Some(1),
            roll_no: None,
            amount: Decimal::ZERO,
            reason: "Waived".into(),
        };
        assert!(fine.validate().is_ok());
    }

    #[test]
    fn payment_status_parses_from_text() {
        assert_eq!("unpaid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Unpaid);
        assert_eq!("paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert!("pending".parse::<PaymentStatus>().is_err());
    }
}
