//! Fines repository for database operations

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::fine::{Fine, FineOverview, PaymentStatus},
};

#[derive(Clone)]
pub struct FinesRepository {
    pool: Pool<Postgres>,
}

impl FinesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert an unpaid fine for a student
    pub async fn create(&self, student_id: i32, amount: Decimal, reason: &str) -> AppResult<i32> {
        let fine_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO fines (student_id, amount, reason) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(student_id)
        .bind(amount)
        .bind(reason)
        .fetch_one(&self.pool)
        .await?;

        Ok(fine_id)
    }

    /// Mark an owned, unpaid fine as paid.
    ///
    /// The guard clause in the UPDATE makes the transition atomic; when it
    /// matches nothing the follow-up read distinguishes an already-paid fine
    /// from one that is missing, foreign, or soft-deleted.
    pub async fn pay(&self, fine_id: i32, student_id: i32) -> AppResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE fines
            SET payment_status = 'paid', paid_at = NOW()
            WHERE id = $1 AND student_id = $2
              AND payment_status = 'unpaid' AND deleted_at IS NULL
            "#,
        )
        .bind(fine_id)
        .bind(student_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 1 {
            return Ok(());
        }

        let existing = sqlx::query_as::<_, Fine>(
            "SELECT * FROM fines WHERE id = $1 AND student_id = $2 AND deleted_at IS NULL",
        )
        .bind(fine_id)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;

        match existing {
            Some(fine) if fine.payment_status == PaymentStatus::Paid => {
                Err(AppError::Conflict("Fine is already paid".to_string()))
            }
            _ => Err(AppError::NotFound("Fine not found".to_string())),
        }
    }

    /// Soft delete: flag the row, keep the history
    pub async fn soft_delete(&self, fine_id: i32) -> AppResult<()> {
        let updated = sqlx::query("UPDATE fines SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(fine_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound("Fine not found".to_string()));
        }

        Ok(())
    }

    /// A student's fines, soft-deleted rows hidden
    pub async fn list_for_student(&self, student_id: i32) -> AppResult<Vec<Fine>> {
        let rows = sqlx::query_as::<_, Fine>(
            r#"
            SELECT * FROM fines
            WHERE student_id = $1 AND deleted_at IS NULL
            ORDER BY payment_status DESC, id DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All fines with student context, optionally including soft-deleted rows
    pub async fn list_all(&self, include_deleted: bool) -> AppResult<Vec<FineOverview>> {
        let rows = sqlx::query_as::<_, FineOverview>(
            r#"
            SELECT f.id, f.student_id, f.amount, f.reason, f.payment_status,
                   f.issued_at, f.paid_at, f.deleted_at,
                   s.roll_no, s.first_name || ' ' || s.last_name AS student_name
            FROM fines f
            JOIN students s ON f.student_id = s.id
            WHERE $1 OR f.deleted_at IS NULL
            ORDER BY f.payment_status DESC, f.id DESC
            "#,
        )
        .bind(include_deleted)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
