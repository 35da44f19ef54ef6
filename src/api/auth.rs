//! Login endpoint

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::auth::{LoginRequest, TokenResponse},
};

/// Authenticate a student or librarian and issue a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    request.validate()?;

    let (token, role) = state.services.auth.login(&request.email, &request.password).await?;

    Ok(Json(TokenResponse { token, role }))
}
