//! Fine lifecycle service

use crate::{
    error::{AppError, AppResult},
    models::fine::{Fine, FineOverview, IssueFine},
    repository::Repository,
};

#[derive(Clone)]
pub struct FinesService {
    repository: Repository,
}

impl FinesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Issue a fine, resolving a roll number to a student id when needed
    pub async fn issue(&self, request: IssueFine) -> AppResult<i32> {
        let student_id = match (request.student_id, request.roll_no.as_deref()) {
            (Some(id), _) => {
                self.repository.students.get_by_id(id).await?;
                id
            }
            (None, Some(roll_no)) => self
                .repository
                .students
                .get_by_roll_no(roll_no)
                .await?
                .ok_or_else(|| AppError::NotFound("Student not found by roll number".to_string()))?
                .id,
            (None, None) => {
                return Err(AppError::Validation(vec![crate::error::FieldViolation {
                    field: "student_id".to_string(),
                    message: "Either student_id or roll_no is required".to_string(),
                }]))
            }
        };

        self.repository
            .fines
            .create(student_id, request.amount, &request.reason)
            .await
    }

    /// Pay an owned, unpaid fine
    pub async fn pay(&self, fine_id: i32, student_id: i32) -> AppResult<()> {
        self.repository.fines.pay(fine_id, student_id).await
    }

    /// Soft-delete a fine, preserving financial history
    pub async fn soft_delete(&self, fine_id: i32) -> AppResult<()> {
        self.repository.fines.soft_delete(fine_id).await
    }

    pub async fn list_own(&self, student_id: i32) -> AppResult<Vec<Fine>> {
        self.repository.fines.list_for_student(student_id).await
    }

    pub async fn list_all(&self, include_deleted: bool) -> AppResult<Vec<FineOverview>> {
        self.repository.fines.list_all(include_deleted).await
    }
}
