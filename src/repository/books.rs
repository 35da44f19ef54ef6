//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDetails, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// All books with author/publisher names joined for display
    pub async fn list(&self) -> AppResult<Vec<BookDetails>> {
        let books = sqlx::query_as::<_, BookDetails>(
            r#"
            SELECT b.*, a.name AS author_name, p.name AS publisher_name
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.id
            LEFT JOIN publishers p ON b.publisher_id = p.id
            ORDER BY b.title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Create a book; every copy starts on the shelf
    pub async fn create(&self, book: &CreateBook) -> AppResult<i32> {
        let book_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books
                (isbn, title, genre, published_year, total_copies, available_copies,
                 author_id, publisher_id)
            VALUES ($1, $2, $3, $4, $5, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.genre)
        .bind(book.published_year)
        .bind(book.total_copies)
        .bind(book.author_id)
        .bind(book.publisher_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("A book with this ISBN already exists".to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::NotFound("Author or publisher not found".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(book_id)
    }

    /// Update a book. A change to `total_copies` shifts `available_copies`
    /// by the same delta inside the transaction; shrinking the total below
    /// the number of checked-out copies is rejected.
    pub async fn update(&self, id: i32, update: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        let new_total = update.total_copies.unwrap_or(current.total_copies);
        let checked_out = current.total_copies - current.available_copies;
        if new_total < checked_out {
            return Err(AppError::Conflict(format!(
                "Cannot reduce total copies below the {} currently checked out",
                checked_out
            )));
        }
        let new_available = current.available_copies + (new_total - current.total_copies);

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, genre = $3, published_year = $4,
                total_copies = $5, available_copies = $6,
                author_id = $7, publisher_id = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.title.as_deref().unwrap_or(&current.title))
        .bind(update.genre.as_deref().or(current.genre.as_deref()))
        .bind(update.published_year.or(current.published_year))
        .bind(new_total)
        .bind(new_available)
        .bind(update.author_id.or(current.author_id))
        .bind(update.publisher_id.or(current.publisher_id))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::not_found_on_fk(e, "Author or publisher not found"))?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Delete a book. Rejected while reservations reference it: cascading
    /// them away would leave issued-count bookkeeping silently wrong.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let active: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE book_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if active > 0 {
            return Err(AppError::Conflict(
                "Book has active reservations and cannot be deleted".to_string(),
            ));
        }

        let deleted = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }
}
