//! Librarian account endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        auth::TokenResponse,
        librarian::{Librarian, RegisterLibrarian},
    },
};

use super::{students::MessageResponse, AuthenticatedUser};

/// Register a new librarian account
#[utoipa::path(
    post,
    path = "/librarians/register",
    tag = "librarians",
    request_body = RegisterLibrarian,
    responses(
        (status = 201, description = "Librarian registered, token issued", body = TokenResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Employee id or email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterLibrarian>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    request.validate()?;

    let (token, _librarian) = state.services.auth.register_librarian(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token,
            role: crate::models::auth::Role::Librarian,
        }),
    ))
}

/// List all librarians (librarian only)
#[utoipa::path(
    get,
    path = "/librarians",
    tag = "librarians",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All librarians", body = Vec<Librarian>),
        (status = 403, description = "Librarians only")
    )
)]
pub async fn list(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Librarian>>> {
    claims.require_librarian()?;

    let librarians = state.services.accounts.list_librarians().await?;
    Ok(Json(librarians))
}

/// Delete a librarian (librarian only)
#[utoipa::path(
    delete,
    path = "/librarians/{id}",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Librarian ID")),
    responses(
        (status = 200, description = "Librarian deleted", body = MessageResponse),
        (status = 403, description = "Librarians only"),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn delete(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_librarian()?;

    state.services.accounts.delete_librarian(id).await?;

    Ok(Json(MessageResponse {
        message: "Librarian deleted".to_string(),
    }))
}
