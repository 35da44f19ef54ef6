//! GD room and booking endpoints

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
    models::{
        auth::Role,
        gd::{CreateGdRoom, GdReservationDetails, GdRoom, ReserveGdRoom},
    },
};

use super::{students::MessageResponse, AuthenticatedUser};

#[derive(Serialize, ToSchema)]
pub struct RoomCreatedResponse {
    pub room_id: i32,
}

#[derive(Serialize, ToSchema)]
pub struct GdReservationCreatedResponse {
    pub gd_reservation_id: i32,
}

/// List all GD rooms
#[utoipa::path(
    get,
    path = "/gd/rooms",
    tag = "gd",
    responses(
        (status = 200, description = "All rooms", body = Vec<GdRoom>)
    )
)]
pub async fn list_rooms(State(state): State<crate::AppState>) -> AppResult<Json<Vec<GdRoom>>> {
    let rooms = state.services.gd.list_rooms().await?;
    Ok(Json(rooms))
}

/// Create a GD room (librarian only)
#[utoipa::path(
    post,
    path = "/gd/rooms",
    tag = "gd",
    security(("bearer_auth" = [])),
    request_body = CreateGdRoom,
    responses(
        (status = 201, description = "Room created", body = RoomCreatedResponse),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Librarians only")
    )
)]
pub async fn create_room(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateGdRoom>,
) -> AppResult<(StatusCode, Json<RoomCreatedResponse>)> {
    claims.require_librarian()?;
    request.validate()?;

    let room_id = state
        .services
        .gd
        .create_room(&request.name, request.capacity)
        .await?;

    Ok((StatusCode::CREATED, Json(RoomCreatedResponse { room_id })))
}

/// Book a GD room (student only); overlapping bookings are rejected
#[utoipa::path(
    post,
    path = "/gd",
    tag = "gd",
    security(("bearer_auth" = [])),
    request_body = ReserveGdRoom,
    responses(
        (status = 201, description = "Room booked", body = GdReservationCreatedResponse),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room already booked for that time")
    )
)]
pub async fn reserve(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<ReserveGdRoom>,
) -> AppResult<(StatusCode, Json<GdReservationCreatedResponse>)> {
    let student_id = claims.require_student()?;
    request.validate()?;

    let gd_reservation_id = state
        .services
        .gd
        .reserve(
            student_id,
            request.room_id,
            request.start_time,
            request.duration_minutes,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(GdReservationCreatedResponse { gd_reservation_id }),
    ))
}

/// List the caller's bookings (student only)
#[utoipa::path(
    get,
    path = "/gd",
    tag = "gd",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own bookings", body = Vec<GdReservationDetails>),
        (status = 403, description = "Students only")
    )
)]
pub async fn list_own(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<GdReservationDetails>>> {
    let student_id = claims.require_student()?;

    let bookings = state.services.gd.list_own(student_id).await?;
    Ok(Json(bookings))
}

/// List all bookings (librarian only)
#[utoipa::path(
    get,
    path = "/gd/all",
    tag = "gd",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All bookings", body = Vec<GdReservationDetails>),
        (status = 403, description = "Librarians only")
    )
)]
pub async fn list_all(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<GdReservationDetails>>> {
    claims.require_librarian()?;

    let bookings = state.services.gd.list_all().await?;
    Ok(Json(bookings))
}

/// Cancel a booking. Students may cancel their own; librarians may delete
/// any booking.
#[utoipa::path(
    delete,
    path = "/gd/{id}",
    tag = "gd",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "GD reservation ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let owner = match claims.role {
        Role::Student => Some(claims.subject_id),
        Role::Librarian => None,
    };

    state.services.gd.cancel(id, owner).await?;

    Ok(Json(MessageResponse {
        message: "GD reservation cancelled".to_string(),
    }))
}
