//! Publisher catalog endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::publisher::{CreatePublisher, Publisher},
};

use super::{books::CreatedResponse, AuthenticatedUser};

/// List all publishers
#[utoipa::path(
    get,
    path = "/publishers",
    tag = "catalog",
    responses(
        (status = 200, description = "All publishers", body = Vec<Publisher>)
    )
)]
pub async fn list(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Publisher>>> {
    let publishers = state.services.catalog.list_publishers().await?;
    Ok(Json(publishers))
}

/// Add a publisher (librarian only)
#[utoipa::path(
    post,
    path = "/publishers",
    tag = "catalog",
    security(("bearer_auth" = [])),
    request_body = CreatePublisher,
    responses(
        (status = 201, description = "Publisher created", body = CreatedResponse),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Librarians only")
    )
)]
pub async fn create(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreatePublisher>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    claims.require_librarian()?;
    request.validate()?;

    let id = state.services.catalog.create_publisher(request).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
