use crate::handlers::request::property_id;
use axum::extract::rejection::PathRejection;
use axum::extract::{Extension, Path, State};
use axum::Json;
use estate_core::services::PropertyService;
use estate_core::{AppState, AuthUser};
use estate_primitives::error::{ApiError, ApiErrorResponse};
use estate_primitives::models::dtos::MessageResponse;
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/api/property/{id}",
    tag = "Properties",
    summary = "Soft-delete a listing",
    params(("id" = i64, Path, description = "Property id")),
    responses(
        (status = 200, description = "Listing hidden from reads", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "Missing or already deleted", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn delete_property(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = property_id(id)?;
    Ok(Json(PropertyService::delete(&state, &user, id).await?))
}
