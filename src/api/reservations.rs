//! Book reservation endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::reservation::{ReservationDetails, ReservationOverview, ReserveBook, ReturnBook},
};

use super::{students::MessageResponse, AuthenticatedUser};

#[derive(Serialize, ToSchema)]
pub struct ReservationCreatedResponse {
    pub reservation_id: i32,
}

/// Reserve a book (student only)
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    request_body = ReserveBook,
    responses(
        (status = 201, description = "Reservation created", body = ReservationCreatedResponse),
        (status = 400, description = "Book not available"),
        (status = 403, description = "Students only")
    )
)]
pub async fn reserve(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<ReserveBook>,
) -> AppResult<(StatusCode, Json<ReservationCreatedResponse>)> {
    let student_id = claims.require_student()?;

    let reservation_id = state
        .services
        .reservations
        .reserve(student_id, request.book_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReservationCreatedResponse { reservation_id }),
    ))
}

/// Return a reserved book (student only)
#[utoipa::path(
    post,
    path = "/reservations/return",
    tag = "reservations",
    security(("bearer_auth" = [])),
    request_body = ReturnBook,
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 403, description = "Students only"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<ReturnBook>,
) -> AppResult<Json<MessageResponse>> {
    let student_id = claims.require_student()?;

    state
        .services
        .reservations
        .return_book(request.reservation_id, student_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Book returned successfully".to_string(),
    }))
}

/// List the caller's reservations (student only)
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own reservations", body = Vec<ReservationDetails>),
        (status = 403, description = "Students only")
    )
)]
pub async fn list_own(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ReservationDetails>>> {
    let student_id = claims.require_student()?;

    let reservations = state.services.reservations.list_own(student_id).await?;
    Ok(Json(reservations))
}

/// List all reservations (librarian only)
#[utoipa::path(
    get,
    path = "/reservations/all",
    tag = "reservations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All reservations", body = Vec<ReservationOverview>),
        (status = 403, description = "Librarians only")
    )
)]
pub async fn list_all(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ReservationOverview>>> {
    claims.require_librarian()?;

    let reservations = state.services.reservations.list_all().await?;
    Ok(Json(reservations))
}

/// Administratively delete a reservation (librarian only)
#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation deleted", body = MessageResponse),
        (status = 403, description = "Librarians only"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn admin_delete(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_librarian()?;

    state.services.reservations.admin_delete(id).await?;

    Ok(Json(MessageResponse {
        message: "Reservation deleted successfully".to_string(),
    }))
}
