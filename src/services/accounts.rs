//! Account management service (students and librarians)

use crate::{
    error::AppResult,
    models::{
        librarian::Librarian,
        student::{Student, UpdateStudent},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AccountsService {
    repository: Repository,
}

impl AccountsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Own profile for an authenticated student
    pub async fn get_student_profile(&self, student_id: i32) -> AppResult<Student> {
        self.repository.students.get_by_id(student_id).await
    }

    pub async fn list_students(&self) -> AppResult<Vec<Student>> {
        self.repository.students.list().await
    }

    pub async fn update_student(&self, id: i32, update: UpdateStudent) -> AppResult<Student> {
        self.repository.students.update(id, &update).await
    }

    /// Delete a student, releasing any books they still hold
    pub async fn delete_student(&self, id: i32) -> AppResult<()> {
        self.repository.students.delete(id).await
    }

    pub async fn list_librarians(&self) -> AppResult<Vec<Librarian>> {
        self.repository.librarians.list().await
    }

    pub async fn delete_librarian(&self, id: i32) -> AppResult<()> {
        self.repository.librarians.delete(id).await
    }
}
