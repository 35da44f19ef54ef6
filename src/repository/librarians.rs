//! Librarians repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        librarian::{Librarian, RegisterLibrarian},
        student::UpdateProfile,
    },
};

#[derive(Clone)]
pub struct LibrariansRepository {
    pool: Pool<Postgres>,
}

impl LibrariansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Librarian> {
        sqlx::query_as::<_, Librarian>("SELECT * FROM librarians WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Librarian with id {} not found", id)))
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<Librarian>> {
        let librarian = sqlx::query_as::<_, Librarian>("SELECT * FROM librarians WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(librarian)
    }

    pub async fn list(&self) -> AppResult<Vec<Librarian>> {
        let librarians =
            sqlx::query_as::<_, Librarian>("SELECT * FROM librarians ORDER BY employee_id")
                .fetch_all(&self.pool)
                .await?;

        Ok(librarians)
    }

    pub async fn create(
        &self,
        librarian: &RegisterLibrarian,
        password_hash: &str,
        age: i32,
    ) -> AppResult<Librarian> {
        let created = sqlx::query_as::<_, Librarian>(
            r#"
            INSERT INTO librarians
                (employee_id, name, email, phone, birthdate, age, employment_date, shift, password)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&librarian.employee_id)
        .bind(&librarian.name)
        .bind(&librarian.email)
        .bind(&librarian.phone)
        .bind(librarian.birthdate)
        .bind(age)
        .bind(librarian.employment_date)
        .bind(&librarian.shift)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Employee id or email already registered"))?;

        Ok(created)
    }

    /// Self-service profile update; password arrives hashed when present
    pub async fn update_profile(
        &self,
        id: i32,
        profile: &UpdateProfile,
        password_hash: Option<String>,
    ) -> AppResult<Librarian> {
        let current = self.get_by_id(id).await?;

        let updated = sqlx::query_as::<_, Librarian>(
            r#"
            UPDATE librarians
            SET email = $2, phone = $3, password = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(profile.email.as_deref().unwrap_or(&current.email))
        .bind(profile.phone.as_deref().unwrap_or(&current.phone))
        .bind(password_hash.as_deref().unwrap_or(&current.password))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Email already registered"))?;

        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM librarians WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::NotFound(format!("Librarian with id {} not found", id)));
        }

        Ok(())
    }
}
