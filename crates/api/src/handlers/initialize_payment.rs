use crate::handlers::request::json_fields;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::Json;
use estate_core::services::PaymentService;
use estate_core::{AppState, AuthUser};
use estate_primitives::error::{ApiError, ApiErrorResponse};
use estate_primitives::models::dtos::{InitializePaymentRequest, InitializePaymentResponse};
use serde_json::Value;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/payment/initialize",
    tag = "Payments",
    summary = "Start a Chapa checkout for a listing",
    description = "Charges the listing's current price in ETB. A pending payment is recorded only \
                   after Chapa accepts the transaction; the client is then redirected to \
                   `checkoutUrl`.",
    request_body = InitializePaymentRequest,
    responses(
        (status = 200, description = "Checkout opened", body = InitializePaymentResponse),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 404, description = "Property not found", body = ApiErrorResponse),
        (status = 502, description = "Chapa rejected or failed the request", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn initialize_payment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<InitializePaymentResponse>, ApiError> {
    let fields = json_fields(body)?;
    let req = InitializePaymentRequest::from_fields(&fields)?;
    Ok(Json(PaymentService::initiate(&state, &user, req).await?))
}
