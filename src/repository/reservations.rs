//! Reservations repository: the copy-accounting transaction core
//!
//! Every multi-statement effect here runs inside one transaction; a failure
//! partway leaves no observable trace. The reserve path uses a guarded
//! conditional decrement so that two concurrent callers can never drive
//! `available_copies` below zero.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::reservation::{Reservation, ReservationDetails, ReservationOverview},
};

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Reserve a book for a student.
    ///
    /// The decrement carries its own availability re-check, so the
    /// read-then-write race of a naive SELECT-then-UPDATE cannot occur:
    /// whichever concurrent transaction loses the row lock sees zero rows
    /// affected and the whole reservation rolls back.
    pub async fn reserve(&self, student_id: i32, book_id: i32) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let decremented = sqlx::query(
            r#"
            UPDATE books
            SET available_copies = available_copies - 1
            WHERE id = $1 AND available_copies >= 1
            "#,
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if decremented == 0 {
            return Err(AppError::NotAvailable("Book not available".to_string()));
        }

        let reservation_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO reservations (student_id, book_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(student_id)
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE students SET total_books_issued = total_books_issued + 1 WHERE id = $1")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(reservation_id)
    }

    /// Return a book: the reservation must belong to the student.
    pub async fn return_by_student(&self, reservation_id: i32, student_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE id = $1 AND student_id = $2",
        )
        .bind(reservation_id)
        .bind(student_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Reservation not found".to_string()))?;

        Self::release(&mut tx, &reservation).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Administrative delete: same release as a return, no ownership check.
    pub async fn admin_delete(&self, reservation_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let reservation =
            sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
                .bind(reservation_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Reservation not found".to_string()))?;

        Self::release(&mut tx, &reservation).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Three-part release: copies back to the shelf (clamped to the total),
    /// issued-count down (clamped at zero), reservation row gone.
    async fn release(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        reservation: &Reservation,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE books
            SET available_copies = LEAST(available_copies + 1, total_copies)
            WHERE id = $1
            "#,
        )
        .bind(reservation.book_id)
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE students
            SET total_books_issued = GREATEST(total_books_issued - 1, 0)
            WHERE id = $1
            "#,
        )
        .bind(reservation.student_id)
        .execute(&mut **tx)
        .await?;

        sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(reservation.id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// A student's own reservations, with book titles joined
    pub async fn list_for_student(&self, student_id: i32) -> AppResult<Vec<ReservationDetails>> {
        let rows = sqlx::query_as::<_, ReservationDetails>(
            r#"
            SELECT r.id, r.student_id, r.book_id, r.reserved_at,
                   b.title, a.name AS author_name
            FROM reservations r
            JOIN books b ON r.book_id = b.id
            LEFT JOIN authors a ON b.author_id = a.id
            WHERE r.student_id = $1
            ORDER BY r.reserved_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All reservations with student context, for the librarian listing
    pub async fn list_all(&self) -> AppResult<Vec<ReservationOverview>> {
        let rows = sqlx::query_as::<_, ReservationOverview>(
            r#"
            SELECT r.id, r.student_id, r.book_id, r.reserved_at,
                   b.title, a.name AS author_name,
                   s.first_name || ' ' || s.last_name AS student_name,
                   s.roll_no
            FROM reservations r
            JOIN books b ON r.book_id = b.id
            JOIN students s ON r.student_id = s.id
            LEFT JOIN authors a ON b.author_id = a.id
            ORDER BY r.reserved_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
