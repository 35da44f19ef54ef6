//! Group-discussion room and booking models

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// GD room row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GdRoom {
    pub id: i32,
    pub name: String,
    /// Seats in the room; descriptive only, bookings are exclusive per room
    pub capacity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGdRoom {
    #[validate(length(min = 1, max = 100, message = "Room name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
}

/// Display status of a booking, derived from the wall clock. A cancelled
/// booking has no status: its row is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GdStatus {
    Upcoming,
    Completed,
}

/// GD booking row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GdReservation {
    pub id: i32,
    pub student_id: i32,
    pub room_id: i32,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i32,
}

impl GdReservation {
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + Duration::minutes(self.duration_minutes as i64)
    }

    /// Derived display status at the given instant
    pub fn status_at(&self, now: DateTime<Utc>) -> GdStatus {
        if self.end_time() <= now {
            GdStatus::Completed
        } else {
            GdStatus::Upcoming
        }
    }
}

/// Booking with room name and derived status for listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GdReservationDetails {
    pub id: i32,
    pub student_id: i32,
    pub room_id: i32,
    pub room_name: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: GdStatus,
}

/// Reserve-room request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReserveGdRoom {
    pub room_id: i32,
    /// Booking start, ISO 8601
    pub start_time: DateTime<Utc>,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking(start: DateTime<Utc>, minutes: i32) -> GdReservation {
        GdReservation {
            id: 1,
            student_id: 1,
            room_id: 1,
            start_time: start,
            duration_minutes: minutes,
        }
    }

    #[test]
    fn status_is_upcoming_until_the_booking_ends() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 14, 0, 0).unwrap();
        let b = booking(start, 60);

        let before = Utc.with_ymd_and_hms(2025, 3, 1, 13, 0, 0).unwrap();
        assert_eq!(b.status_at(before), GdStatus::Upcoming);

        let during = Utc.with_ymd_and_hms(2025, 3, 1, 14, 30, 0).unwrap();
        assert_eq!(b.status_at(during), GdStatus::Upcoming);

        let after = Utc.with_ymd_and_hms(2025, 3, 1, 15, 0, 0).unwrap();
        assert_eq!(b.status_at(after), GdStatus::Completed);
    }

    #[test]
    fn end_time_adds_duration() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let b = booking(start, 90);
        assert_eq!(b.end_time(), Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap());
    }
}
