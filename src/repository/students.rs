//! Students repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::student::{RegisterStudent, Student, UpdateProfile, UpdateStudent},
};

#[derive(Clone)]
pub struct StudentsRepository {
    pool: Pool<Postgres>,
}

impl StudentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Student> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with id {} not found", id)))
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(student)
    }

    pub async fn get_by_roll_no(&self, roll_no: &str) -> AppResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE roll_no = $1")
            .bind(roll_no)
            .fetch_optional(&self.pool)
            .await?;

        Ok(student)
    }

    pub async fn list(&self) -> AppResult<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>("SELECT * FROM students ORDER BY roll_no")
            .fetch_all(&self.pool)
            .await?;

        Ok(students)
    }

    /// Insert a student row; password arrives already hashed, age already
    /// derived from the birthdate.
    pub async fn create(
        &self,
        student: &RegisterStudent,
        password_hash: &str,
        age: i32,
    ) -> AppResult<Student> {
        let created = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students
                (roll_no, first_name, last_name, email, phone, birthdate, age, password)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&student.roll_no)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(&student.phone)
        .bind(student.birthdate)
        .bind(age)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Roll number or email already registered"))?;

        Ok(created)
    }

    pub async fn update(&self, id: i32, update: &UpdateStudent) -> AppResult<Student> {
        let current = self.get_by_id(id).await?;

        let updated = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET first_name = $2, last_name = $3, email = $4, phone = $5,
                membership_type = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.first_name.as_deref().unwrap_or(&current.first_name))
        .bind(update.last_name.as_deref().unwrap_or(&current.last_name))
        .bind(update.email.as_deref().unwrap_or(&current.email))
        .bind(update.phone.as_deref().unwrap_or(&current.phone))
        .bind(update.membership_type.unwrap_or(current.membership_type))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Email already registered"))?;

        Ok(updated)
    }

    /// Self-service profile update; password arrives hashed when present
    pub async fn update_profile(
        &self,
        id: i32,
        profile: &UpdateProfile,
        password_hash: Option<String>,
    ) -> AppResult<Student> {
        let current = self.get_by_id(id).await?;

        let updated = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
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

    /// Delete a student. Their active reservations are released first (book
    /// counters restored) in the same transaction; fines and GD bookings go
    /// with the foreign-key cascade.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE books b
            SET available_copies = LEAST(b.available_copies + r.cnt, b.total_copies)
            FROM (
                SELECT book_id, COUNT(*)::int AS cnt
                FROM reservations
                WHERE student_id = $1
                GROUP BY book_id
            ) r
            WHERE b.id = r.book_id
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::NotFound(format!("Student with id {} not found", id)));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Age in full years at the reference date; zero for a future birthdate
    pub fn age_at(birthdate: NaiveDate, today: NaiveDate) -> i32 {
        today.years_since(birthdate).map(|y| y as i32).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_counts_full_years_only() {
        let birth = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
        assert_eq!(
            StudentsRepository::age_at(birth, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()),
            23
        );
        assert_eq!(
            StudentsRepository::age_at(birth, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()),
            24
        );
        assert_eq!(
            StudentsRepository::age_at(birth, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()),
            24
        );
    }

    #[test]
    fn age_is_zero_for_future_birthdate() {
        let birth = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_eq!(
            StudentsRepository::age_at(birth, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            0
        );
    }
}
