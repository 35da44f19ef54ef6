//! Student account endpoints

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
        auth::TokenResponse,
        student::{RegisterStudent, Student, UpdateProfile, UpdateStudent},
    },
};

use super::AuthenticatedUser;

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Register a new student account
#[utoipa::path(
    post,
    path = "/students/register",
    tag = "students",
    request_body = RegisterStudent,
    responses(
        (status = 201, description = "Student registered, token issued", body = TokenResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Roll number or email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterStudent>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    request.validate()?;

    let (token, _student) = state.services.auth.register_student(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token,
            role: crate::models::auth::Role::Student,
        }),
    ))
}

/// Own profile for the authenticated student
#[utoipa::path(
    get,
    path = "/students/profile",
    tag = "students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Student profile", body = Student),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Students only")
    )
)]
pub async fn get_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Student>> {
    let student_id = claims.require_student()?;

    let student = state.services.accounts.get_student_profile(student_id).await?;
    Ok(Json(student))
}

/// Update the caller's own profile; valid for either role
#[utoipa::path(
    put,
    path = "/students/profile",
    tag = "students",
    security(("bearer_auth" = [])),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpdateProfile>,
) -> AppResult<Json<MessageResponse>> {
    request.validate()?;

    state.services.auth.update_profile(&claims, request).await?;

    Ok(Json(MessageResponse {
        message: "Profile updated".to_string(),
    }))
}

/// List all students (librarian only)
#[utoipa::path(
    get,
    path = "/students/all",
    tag = "students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All students", body = Vec<Student>),
        (status = 403, description = "Librarians only")
    )
)]
pub async fn list_all(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Student>>> {
    claims.require_librarian()?;

    let students = state.services.accounts.list_students().await?;
    Ok(Json(students))
}

/// Update a student (librarian only)
#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    request_body = UpdateStudent,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 403, description = "Librarians only"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn update(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStudent>,
) -> AppResult<Json<Student>> {
    claims.require_librarian()?;
    request.validate()?;

    let student = state.services.accounts.update_student(id, request).await?;
    Ok(Json(student))
}

/// Delete a student (librarian only); releases any books they still hold
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 403, description = "Librarians only"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_librarian()?;

    state.services.accounts.delete_student(id).await?;

    Ok(Json(MessageResponse {
        message: "Student deleted".to_string(),
    }))
}
