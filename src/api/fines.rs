//! Fine endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppResult,
    models::fine::{Fine, FineOverview, IssueFine, PayFine},
};

use super::{students::MessageResponse, AuthenticatedUser};

#[derive(Serialize, ToSchema)]
pub struct FineCreatedResponse {
    pub fine_id: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FineListQuery {
    /// Include soft-deleted fines in the listing
    pub include_deleted: Option<bool>,
}

/// Issue a fine to a student by id or roll number (librarian only)
#[utoipa::path(
    post,
    path = "/fines",
    tag = "fines",
    security(("bearer_auth" = [])),
    request_body = IssueFine,
    responses(
        (status = 201, description = "Fine issued", body = FineCreatedResponse),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Librarians only"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn issue(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<IssueFine>,
) -> AppResult<(StatusCode, Json<FineCreatedResponse>)> {
    claims.require_librarian()?;
    request.validate()?;

    let fine_id = state.services.fines.issue(request).await?;

    Ok((StatusCode::CREATED, Json(FineCreatedResponse { fine_id })))
}

/// Pay one of the caller's unpaid fines (student only)
#[utoipa::path(
    post,
    path = "/fines/pay",
    tag = "fines",
    security(("bearer_auth" = [])),
    request_body = PayFine,
    responses(
        (status = 200, description = "Fine paid", body = MessageResponse),
        (status = 403, description = "Students only"),
        (status = 404, description = "Fine not found"),
        (status = 409, description = "Fine is already paid")
    )
)]
pub async fn pay(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<PayFine>,
) -> AppResult<Json<MessageResponse>> {
    let student_id = claims.require_student()?;

    state.services.fines.pay(request.fine_id, student_id).await?;

    Ok(Json(MessageResponse {
        message: "Fine paid successfully".to_string(),
    }))
}

/// List the caller's fines (student only); soft-deleted fines are hidden
#[utoipa::path(
    get,
    path = "/fines",
    tag = "fines",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own fines", body = Vec<Fine>),
        (status = 403, description = "Students only")
    )
)]
pub async fn list_own(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Fine>>> {
    let student_id = claims.require_student()?;

    let fines = state.services.fines.list_own(student_id).await?;
    Ok(Json(fines))
}

/// List all fines (librarian only)
#[utoipa::path(
    get,
    path = "/fines/all",
    tag = "fines",
    security(("bearer_auth" = [])),
    params(FineListQuery),
    responses(
        (status = 200, description = "All fines", body = Vec<FineOverview>),
        (status = 403, description = "Librarians only")
    )
)]
pub async fn list_all(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<FineListQuery>,
) -> AppResult<Json<Vec<FineOverview>>> {
    claims.require_librarian()?;

    let fines = state
        .services
        .fines
        .list_all(query.include_deleted.unwrap_or(false))
        .await?;
    Ok(Json(fines))
}

/// Soft-delete a fine (librarian only); the row is retained for history
#[utoipa::path(
    delete,
    path = "/fines/{id}",
    tag = "fines",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Fine ID")),
    responses(
        (status = 200, description = "Fine deleted", body = MessageResponse),
        (status = 403, description = "Librarians only"),
        (status = 404, description = "Fine not found")
    )
)]
pub async fn delete(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_librarian()?;

    state.services.fines.soft_delete(id).await?;

    Ok(Json(MessageResponse {
        message: "Fine deleted successfully".to_string(),
    }))
}
