use crate::handlers::request::query_fields;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use estate_core::services::SearchService;
use estate_core::AppState;
use estate_primitives::error::{ApiError, ApiErrorResponse};
use estate_primitives::models::dtos::{SearchParams, SearchQuery, SearchResponse};
use std::collections::HashMap;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/properties/search",
    tag = "Properties",
    summary = "Search active properties",
    description = "Every supplied filter must hold. Text filters are case-insensitive substring \
                   matches and `features` is a comma separated list where each entry must appear. \
                   Results are ordered by `sortBy`/`sortOrder`, then by id.",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching listings with pagination", body = SearchResponse),
        (status = 400, description = "Invalid filter or paging value", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    security(()),
)]
pub async fn search_properties(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let fields = query_fields(query)?;
    let query = SearchQuery::from_fields(&fields)?;
    Ok(Json(SearchService::search(&state, &query).await?))
}
