use axum::{
    extract::{Extension, State},
    Json,
};
use estate_core::services::AuthService;
use estate_core::{AppState, AuthUser};
use estate_primitives::error::{ApiError, ApiErrorResponse};
use estate_primitives::models::dtos::UserDto;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The authenticated user", body = UserDto),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "Account no longer exists", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Auth"
)]
pub async fn current_user_details(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserDto>, ApiError> {
    Ok(Json(AuthService::current_user(&state, &user).await?))
}
