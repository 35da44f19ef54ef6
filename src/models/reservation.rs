//! Book reservation model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Reservation row. A reservation is active while its row exists; returning
/// or administratively deleting it removes the row and restores the book's
/// available-copy count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub student_id: i32,
    pub book_id: i32,
    pub reserved_at: DateTime<Utc>,
}

/// Reservation with book/author context for a student's own listing
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReservationDetails {
    pub id: i32,
    pub student_id: i32,
    pub book_id: i32,
    pub reserved_at: DateTime<Utc>,
    pub title: String,
    pub author_name: Option<String>,
}

/// Reservation with book and student context for the librarian listing
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReservationOverview {
    pub id: i32,
    pub student_id: i32,
    pub book_id: i32,
    pub reserved_at: DateTime<Utc>,
    pub title: String,
    pub author_name: Option<String>,
    pub student_name: String,
    pub roll_no: String,
}

/// Reserve request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReserveBook {
    pub book_id: i32,
}

/// Return request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReturnBook {
    pub reservation_id: i32,
}
