use crate::handlers::request::{json_fields, property_id};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Extension, Path, State};
use axum::Json;
use estate_core::services::PropertyService;
use estate_core::{AppState, AuthUser};
use estate_primitives::error::{ApiError, ApiErrorResponse};
use estate_primitives::models::entities::Property;
use serde_json::Value;
use std::sync::Arc;

#[utoipa::path(
    put,
    path = "/api/property/{id}",
    tag = "Properties",
    summary = "Replace a listing",
    description = "Full replacement with the same rules as creation. `images` is an optional \
                   non-empty array of stored references; when omitted the current images are kept.",
    params(("id" = i64, Path, description = "Property id")),
    request_body(content = serde_json::Value, description = "Listing fields in camelCase"),
    responses(
        (status = 200, description = "Updated listing", body = Property),
        (status = 400, description = "Invalid body", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "No active listing with that id", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn update_property(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Property>, ApiError> {
    let id = property_id(id)?;
    let fields = json_fields(body)?;
    Ok(Json(PropertyService::update(&state, &user, id, &fields).await?))
}
