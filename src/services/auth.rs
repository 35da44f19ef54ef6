//! Authentication service: password hashing, login, registration

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        auth::{Claims, Role},
        librarian::{Librarian, RegisterLibrarian},
        student::{RegisterStudent, Student, UpdateProfile},
    },
    repository::{students::StudentsRepository, Repository},
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate either role by email. Students are checked first, then
    /// librarians; the same failure message covers a missing account and a
    /// wrong password.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, Role)> {
        if let Some(student) = self.repository.students.get_by_email(email).await? {
            if self.verify_password(&student.password, password)? {
                let token = self.issue_token(&student.email, student.id, Role::Student)?;
                return Ok((token, Role::Student));
            }
        }

        if let Some(librarian) = self.repository.librarians.get_by_email(email).await? {
            if self.verify_password(&librarian.password, password)? {
                let token = self.issue_token(&librarian.email, librarian.id, Role::Librarian)?;
                return Ok((token, Role::Librarian));
            }
        }

        Err(AppError::Authentication("Invalid credentials".to_string()))
    }

    /// Register a student and issue a token immediately
    pub async fn register_student(&self, request: RegisterStudent) -> AppResult<(String, Student)> {
        let hash = self.hash_password(&request.password)?;
        let age = StudentsRepository::age_at(request.birthdate, Utc::now().date_naive());

        let student = self.repository.students.create(&request, &hash, age).await?;
        let token = self.issue_token(&student.email, student.id, Role::Student)?;

        Ok((token, student))
    }

    /// Register a librarian and issue a token immediately
    pub async fn register_librarian(
        &self,
        request: RegisterLibrarian,
    ) -> AppResult<(String, Librarian)> {
        let hash = self.hash_password(&request.password)?;
        let age = StudentsRepository::age_at(request.birthdate, Utc::now().date_naive());

        let librarian = self.repository.librarians.create(&request, &hash, age).await?;
        let token = self.issue_token(&librarian.email, librarian.id, Role::Librarian)?;

        Ok((token, librarian))
    }

    /// Self-service profile update, dispatched on the caller's role
    pub async fn update_profile(&self, claims: &Claims, profile: UpdateProfile) -> AppResult<()> {
        let password_hash = match &profile.password {
            Some(password) => Some(self.hash_password(password)?),
            None => None,
        };

        match claims.role {
            Role::Student => {
                self.repository
                    .students
                    .update_profile(claims.subject_id, &profile, password_hash)
                    .await?;
            }
            Role::Librarian => {
                self.repository
                    .librarians
                    .update_profile(claims.subject_id, &profile, password_hash)
                    .await?;
            }
        }

        Ok(())
    }

    /// Sign a token for the subject
    fn issue_token(&self, email: &str, subject_id: i32, role: Role) -> AppResult<String> {
        let claims = Claims::new(
            email.to_string(),
            subject_id,
            role,
            Utc::now().timestamp(),
            self.config.jwt_expiration_hours,
        );
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, hash: &str, password: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
