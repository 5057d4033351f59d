use crate::handlers::request::json_body;
use axum::extract::rejection::JsonRejection;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use estate_core::services::AuthService;
use estate_core::AppState;
use estate_primitives::error::{ApiError, ApiErrorResponse};
use estate_primitives::models::dtos::{AuthResponse, RegisterRequest};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered and signed in", body = AuthResponse),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 409, description = "Email already registered", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let payload = json_body(payload)?;
    let response = AuthService::register(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
