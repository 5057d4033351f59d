use crate::handlers::request::json_body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use estate_core::services::AuthService;
use estate_core::AppState;
use estate_primitives::error::{ApiError, ApiErrorResponse};
use estate_primitives::models::dtos::{AuthResponse, LoginRequest};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Malformed request", body = ApiErrorResponse),
        (status = 401, description = "Invalid credentials", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let payload = json_body(payload)?;
    Ok(Json(AuthService::login(&state, payload).await?))
}
