//! Author catalog endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::author::{Author, CreateAuthor},
};

use super::{books::CreatedResponse, AuthenticatedUser};

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "catalog",
    responses(
        (status = 200, description = "All authors", body = Vec<Author>)
    )
)]
pub async fn list(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.catalog.list_authors().await?;
    Ok(Json(authors))
}

/// Add an author (librarian only)
#[utoipa::path(
    post,
    path = "/authors",
    tag = "catalog",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = CreatedResponse),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Librarians only")
    )
)]
pub async fn create(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    claims.require_librarian()?;
    request.validate()?;

    let id = state.services.catalog.create_author(request).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
