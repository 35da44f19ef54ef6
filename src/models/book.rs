//! Book catalog model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::ISBN_RE;

/// Book model from database.
///
/// Invariant: `0 <= available_copies <= total_copies`. Both counters are
/// mutated only by ledger operations, never directly from client input.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub isbn: String,
    pub title: String,
    pub genre: Option<String>,
    pub published_year: Option<i32>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub author_id: Option<i32>,
    pub publisher_id: Option<i32>,
}

/// Book row with author/publisher names joined for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub isbn: String,
    pub title: String,
    pub genre: Option<String>,
    pub published_year: Option<i32>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub author_id: Option<i32>,
    pub publisher_id: Option<i32>,
    pub author_name: Option<String>,
    pub publisher_name: Option<String>,
}

/// Create book request. `available_copies` is not accepted: a new book
/// starts with every copy available.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(regex(path = *ISBN_RE, message = "ISBN must be 10-13 numeric digits"))]
    pub isbn: String,
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(max = 50, message = "Genre too long"))]
    pub genre: Option<String>,
    #[validate(range(min = 1, message = "Total copies must be at least 1"))]
    pub total_copies: i32,
    pub published_year: Option<i32>,
    pub author_id: Option<i32>,
    pub publisher_id: Option<i32>,
}

/// Update book request. Changing `total_copies` shifts `available_copies`
/// by the same delta inside the update transaction.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(max = 50, message = "Genre too long"))]
    pub genre: Option<String>,
    #[validate(range(min = 1, message = "Total copies must be at least 1"))]
    pub total_copies: Option<i32>,
    pub published_year: Option<i32>,
    pub author_id: Option<i32>,
    pub publisher_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn create_book_validates_isbn_and_copies() {
        let book = CreateBook {
            isbn: "9780451524935".into(),
            title: "1984".into(),
            genre: Some("Dystopian".into()),
            total_copies: 5,
            published_year: Some(1949),
            author_id: None,
            publisher_id: None,
        };
        assert!(book.validate().is_ok());

        let bad = CreateBook {
            isbn: "978-0451524935".into(),
            title: "".into(),
            genre: None,
            total_copies: 0,
            published_year: None,
            author_id: None,
            publisher_id: None,
        };
        let err = bad.validate().unwrap_err();
        let fields = err.field_errors();
        assert!(fields.contains_key("isbn"));
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("total_copies"));
    }
}
