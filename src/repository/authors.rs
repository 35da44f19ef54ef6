//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::author::{Author, CreateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(authors)
    }

    pub async fn create(&self, author: &CreateAuthor) -> AppResult<i32> {
        let author_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO authors (name, biography, nationality) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&author.name)
        .bind(&author.biography)
        .bind(&author.nationality)
        .fetch_one(&self.pool)
        .await?;

        Ok(author_id)
    }
}
