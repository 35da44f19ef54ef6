//! Reservation service: copy-accounting operations over books

use crate::{
    error::AppResult,
    models::reservation::{ReservationDetails, ReservationOverview},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Reserve a book for the authenticated student
    pub async fn reserve(&self, student_id: i32, book_id: i32) -> AppResult<i32> {
        // Verify the account still exists; the token may outlive it
        self.repository.students.get_by_id(student_id).await?;
        self.repository.reservations.reserve(student_id, book_id).await
    }

    /// Return a book; the reservation must belong to the student
    pub async fn return_book(&self, reservation_id: i32, student_id: i32) -> AppResult<()> {
        self.repository
            .reservations
            .return_by_student(reservation_id, student_id)
            .await
    }

    /// Administrative delete without the ownership check
    pub async fn admin_delete(&self, reservation_id: i32) -> AppResult<()> {
        self.repository.reservations.admin_delete(reservation_id).await
    }

    pub async fn list_own(&self, student_id: i32) -> AppResult<Vec<ReservationDetails>> {
        self.repository.reservations.list_for_student(student_id).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<ReservationOverview>> {
        self.repository.reservations.list_all().await
    }
}
