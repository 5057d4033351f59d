use crate::handlers::request::query_fields;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use estate_core::services::PropertyService;
use estate_core::AppState;
use estate_primitives::error::{ApiError, ApiErrorResponse};
use estate_primitives::models::dtos::{page_from_fields, PageParams, PropertyListResponse};
use std::collections::HashMap;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/properties",
    tag = "Properties",
    summary = "List active properties, newest first",
    params(PageParams),
    responses(
        (status = 200, description = "One page of listings", body = PropertyListResponse),
        (status = 400, description = "page or limit out of range", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    security(()),
)]
pub async fn list_properties(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<PropertyListResponse>, ApiError> {
    let fields = query_fields(query)?;
    let page = page_from_fields(&fields)?;
    Ok(Json(PropertyService::list(&state, page).await?))
}
