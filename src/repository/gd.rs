//! GD room and booking repository

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::gd::{GdReservation, GdReservationDetails, GdRoom},
};

#[derive(Clone)]
pub struct GdRepository {
    pool: Pool<Postgres>,
}

impl GdRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn create_room(&self, name: &str, capacity: i32) -> AppResult<i32> {
        let room_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO gd_rooms (name, capacity) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(capacity)
        .fetch_one(&self.pool)
        .await?;

        Ok(room_id)
    }

    pub async fn list_rooms(&self) -> AppResult<Vec<GdRoom>> {
        let rooms = sqlx::query_as::<_, GdRoom>("SELECT * FROM gd_rooms ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rooms)
    }

    /// Book a room for a time window.
    ///
    /// The room row is locked for the transaction so concurrent bookings of
    /// the same room serialize; an interval-overlap check then rejects a
    /// double-booking before the insert.
    pub async fn reserve(
        &self,
        student_id: i32,
        room_id: i32,
        start_time: DateTime<Utc>,
        duration_minutes: i32,
    ) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let room_exists =
            sqlx::query_scalar::<_, i32>("SELECT id FROM gd_rooms WHERE id = $1 FOR UPDATE")
                .bind(room_id)
                .fetch_optional(&mut *tx)
                .await?;

        if room_exists.is_none() {
            return Err(AppError::NotFound("Room not found".to_string()));
        }

        let overlapping: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM gd_reservations
                WHERE room_id = $1
                  AND start_time < $2 + make_interval(mins => $3)
                  AND start_time + make_interval(mins => duration_minutes) > $2
            )
            "#,
        )
        .bind(room_id)
        .bind(start_time)
        .bind(duration_minutes)
        .fetch_one(&mut *tx)
        .await?;

        if overlapping {
            return Err(AppError::Conflict(
                "Room is already booked for that time".to_string(),
            ));
        }

        let reservation_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO gd_reservations (student_id, room_id, start_time, duration_minutes)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(student_id)
        .bind(room_id)
        .bind(start_time)
        .bind(duration_minutes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(reservation_id)
    }

    /// Cancel a booking; when `student_id` is given the booking must be owned
    /// by that student (librarians pass `None`).
    pub async fn cancel(&self, reservation_id: i32, student_id: Option<i32>) -> AppResult<()> {
        let deleted = match student_id {
            Some(student_id) => {
                sqlx::query("DELETE FROM gd_reservations WHERE id = $1 AND student_id = $2")
                    .bind(reservation_id)
                    .bind(student_id)
                    .execute(&self.pool)
                    .await?
                    .rows_affected()
            }
            None => sqlx::query("DELETE FROM gd_reservations WHERE id = $1")
                .bind(reservation_id)
                .execute(&self.pool)
                .await?
                .rows_affected(),
        };

        if deleted == 0 {
            return Err(AppError::NotFound("GD reservation not found".to_string()));
        }

        Ok(())
    }

    /// A student's bookings with room names; status derived at read time
    pub async fn list_for_student(&self, student_id: i32) -> AppResult<Vec<GdReservationDetails>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT g.id, g.student_id, g.room_id, g.start_time, g.duration_minutes,
                   r.name AS room_name
            FROM gd_reservations g
            JOIN gd_rooms r ON g.room_id = r.id
            WHERE g.student_id = $1
            ORDER BY g.start_time DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        let now = Utc::now();
        Ok(rows.into_iter().map(|row| row.into_details(now)).collect())
    }

    /// All bookings, for the librarian listing
    pub async fn list_all(&self) -> AppResult<Vec<GdReservationDetails>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT g.id, g.student_id, g.room_id, g.start_time, g.duration_minutes,
                   r.name AS room_name
            FROM gd_reservations g
            JOIN gd_rooms r ON g.room_id = r.id
            ORDER BY g.start_time DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let now = Utc::now();
        Ok(rows.into_iter().map(|row| row.into_details(now)).collect())
    }
}

/// Internal row for booking queries before status derivation
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i32,
    student_id: i32,
    room_id: i32,
    start_time: DateTime<Utc>,
    duration_minutes: i32,
    room_name: String,
}

impl BookingRow {
    fn into_details(self, now: DateTime<Utc>) -> GdReservationDetails {
        let reservation = GdReservation {
            id: self.id,
            student_id: self.student_id,
            room_id: self.room_id,
            start_time: self.start_time,
            duration_minutes: self.duration_minutes,
        };
        let status = reservation.status_at(now);
        GdReservationDetails {
            id: reservation.id,
            student_id: reservation.student_id,
            room_id: reservation.room_id,
            room_name: self.room_name,
            start_time: reservation.start_time,
            duration_minutes: reservation.duration_minutes,
            status,
        }
    }
}
