use crate::handlers::request::property_id;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use estate_core::services::PropertyService;
use estate_core::AppState;
use estate_primitives::error::{ApiError, ApiErrorResponse};
use estate_primitives::models::entities::Property;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/property/{id}",
    tag = "Properties",
    params(("id" = i64, Path, description = "Property id")),
    responses(
        (status = 200, description = "The listing", body = Property),
        (status = 400, description = "Malformed id", body = ApiErrorResponse),
        (status = 404, description = "No active listing with that id", body = ApiErrorResponse),
    ),
    security(()),
)]
pub async fn get_property(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Property>, ApiError> {
    let id = property_id(id)?;
    Ok(Json(PropertyService::get(&state, id).await?))
}
