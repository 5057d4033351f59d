use crate::handlers::request::query_params;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use estate_core::services::PaymentService;
use estate_core::AppState;
use estate_primitives::error::{ApiError, ApiErrorResponse};
use estate_primitives::models::dtos::{VerifyPaymentQuery, VerifyPaymentResponse};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/payment/verify",
    tag = "Payments",
    summary = "Reconcile a payment with Chapa",
    description = "Also used as the Chapa callback URL. Pending payments are checked with the \
                   gateway and settled once; settled payments are returned unchanged.",
    params(VerifyPaymentQuery),
    responses(
        (status = 200, description = "Current payment state", body = VerifyPaymentResponse),
        (status = 400, description = "Missing transaction reference", body = ApiErrorResponse),
        (status = 404, description = "Payment not found", body = ApiErrorResponse),
        (status = 502, description = "Chapa could not be reached", body = ApiErrorResponse),
    ),
    security(()),
)]
pub async fn verify_payment(
    State(state): State<Arc<AppState>>,
    query: Result<Query<VerifyPaymentQuery>, QueryRejection>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    let tx_ref = query_params(query)?.reference()?;
    Ok(Json(PaymentService::verify(&state, &tx_ref).await?))
}
