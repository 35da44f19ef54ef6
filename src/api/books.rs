//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, BookDetails, CreateBook, UpdateBook},
};

use super::{students::MessageResponse, AuthenticatedUser};

#[derive(Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i32,
}

/// List all books with author and publisher names
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<BookDetails>)
    )
)]
pub async fn list(State(state): State<crate::AppState>) -> AppResult<Json<Vec<BookDetails>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Add a book to the catalog (librarian only)
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = CreatedResponse),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Librarians only"),
        (status = 409, description = "ISBN already exists")
    )
)]
pub async fn create(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    claims.require_librarian()?;
    request.validate()?;

    let id = state.services.catalog.create_book(request).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Update a book (librarian only). A new total-copy count shifts the
/// available count by the same delta.
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 403, description = "Librarians only"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Total below checked-out copies")
    )
)]
pub async fn update(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    claims.require_librarian()?;
    request.validate()?;

    let book = state.services.catalog.update_book(id, request).await?;
    Ok(Json(book))
}

/// Delete a book (librarian only); rejected while reservations reference it
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 403, description = "Librarians only"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book has active reservations")
    )
)]
pub async fn delete(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_librarian()?;

    state.services.catalog.delete_book(id).await?;

    Ok(Json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}
