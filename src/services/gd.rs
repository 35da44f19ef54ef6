//! GD room booking service

use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::gd::{GdReservationDetails, GdRoom},
    repository::Repository,
};

#[derive(Clone)]
pub struct GdService {
    repository: Repository,
}

impl GdService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn create_room(&self, name: &str, capacity: i32) -> AppResult<i32> {
        self.repository.gd.create_room(name, capacity).await
    }

    pub async fn list_rooms(&self) -> AppResult<Vec<GdRoom>> {
        self.repository.gd.list_rooms().await
    }

    /// Book a room for the authenticated student
    pub async fn reserve(
        &self,
        student_id: i32,
        room_id: i32,
        start_time: DateTime<Utc>,
        duration_minutes: i32,
    ) -> AppResult<i32> {
        self.repository.students.get_by_id(student_id).await?;
        self.repository
            .gd
            .reserve(student_id, room_id, start_time, duration_minutes)
            .await
    }

    /// Students cancel their own booking; librarians may delete any
    pub async fn cancel(&self, reservation_id: i32, student_id: Option<i32>) -> AppResult<()> {
        self.repository.gd.cancel(reservation_id, student_id).await
    }

    pub async fn list_own(&self, student_id: i32) -> AppResult<Vec<GdReservationDetails>> {
        self.repository.gd.list_for_student(student_id).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<GdReservationDetails>> {
        self.repository.gd.list_all().await
    }
}
