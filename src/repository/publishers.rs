//! Publishers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::publisher::{CreatePublisher, Publisher},
};

#[derive(Clone)]
pub struct PublishersRepository {
    pool: Pool<Postgres>,
}

impl PublishersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Publisher>> {
        let publishers = sqlx::query_as::<_, Publisher>("SELECT * FROM publishers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(publishers)
    }

    pub async fn create(&self, publisher: &CreatePublisher) -> AppResult<i32> {
        let publisher_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO publishers (name, location, contact) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&publisher.name)
        .bind(&publisher.location)
        .bind(&publisher.contact)
        .fetch_one(&self.pool)
        .await?;

        Ok(publisher_id)
    }
}
