use crate::app_state::AppState;
use crate::security::AuthUser;
use estate_primitives::error::ApiError;
use estate_primitives::models::app_state::AppConfig;
use estate_primitives::models::dtos::{
    ChapaCustomization, ChapaInitializeRequest, GatewayVerification, InitializePaymentRequest,
    InitializePaymentResponse, VerifyPaymentResponse,
};
use estate_primitives::models::entities::{
    NewPayment, PaymentStatus, Property, PAYMENT_CURRENCY,
};
use estate_primitives::utility::truncate_chars;
use tracing::{error, info, warn};
use uuid::Uuid;

const CHECKOUT_TITLE: &str = "Property Payment";
const DESCRIPTION_PREVIEW_CHARS: usize = 50;

pub struct PaymentService;

impl PaymentService {
    /// Opens a hosted checkout for an active listing. The payment row is only
    /// written once the gateway has accepted the transaction.
    pub async fn initiate(
        state: &AppState,
        user: &AuthUser,
        req: InitializePaymentRequest,
    ) -> Result<InitializePaymentResponse, ApiError> {
        let property = state
            .properties
            .find_active(req.property_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Property not found".into()))?;

        let tx_ref = format!("TX-{}", Uuid::new_v4());
        let payload = Self::checkout_request(&state.config, &property, user, &req, &tx_ref);

        let session = state.gateway.initialize(&payload).await.map_err(|e| {
            warn!(tx_ref = %tx_ref, property_id = property.id, error = %e, "Checkout initialization failed");
            ApiError::from(e)
        })?;

        let payment = state
            .payments
            .create(NewPayment {
                user_id: user.id,
                property_id: property.id,
                amount: property.price,
                currency: PAYMENT_CURRENCY.to_string(),
                tx_ref: tx_ref.clone(),
                status: PaymentStatus::Pending,
            })
            .await
            .map_err(|e| {
                error!(tx_ref = %tx_ref, error = %e, "Checkout opened but payment was not recorded");
                e
            })?;

        info!(
            tx_ref = %payment.tx_ref,
            property_id = payment.property_id,
            user_id = %user.id,
            amount = payment.amount,
            "Payment initiated"
        );

        Ok(InitializePaymentResponse {
            tx_ref: payment.tx_ref,
            status: payment.status,
            message: session.message,
            checkout_url: session.checkout_url,
        })
    }

    pub fn checkout_request(
        config: &AppConfig,
        property: &Property,
        user: &AuthUser,
        req: &InitializePaymentRequest,
        tx_ref: &str,
    ) -> ChapaInitializeRequest {
        ChapaInitializeRequest {
            amount: property.price,
            currency: PAYMENT_CURRENCY.to_string(),
            email: req.email.clone().unwrap_or_else(|| user.email.clone()),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            tx_ref: tx_ref.to_string(),
            callback_url: config.payment_callback_url(),
            return_url: config.payment_return_url(),
            customization: ChapaCustomization {
                title: CHECKOUT_TITLE.to_string(),
                description: format!(
                    "Payment for property: {}...",
                    truncate_chars(&property.description, DESCRIPTION_PREVIEW_CHARS)
                ),
            },
        }
    }

    pub fn settlement_status(verification: &GatewayVerification) -> PaymentStatus {
        if verification.is_success() {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Failed
        }
    }

    /// Reconciles a payment with the gateway. Settled payments are returned
    /// as they are, without asking the gateway again.
    pub async fn verify(state: &AppState, tx_ref: &str) -> Result<VerifyPaymentResponse, ApiError> {
        let payment = state
            .payments
            .find_by_tx_ref(tx_ref)
            .await?
            .ok_or_else(|| ApiError::NotFound("Payment not found".into()))?;

        if payment.status.is_terminal() {
            return Ok(VerifyPaymentResponse::from_payment(&payment, None));
        }

        let verification = state.gateway.verify(tx_ref).await.map_err(|e| {
            warn!(tx_ref, error = %e, "Payment verification failed");
            ApiError::from(e)
        })?;

        if let Some(amount) = verification.amount {
            if (amount - payment.amount).abs() > 0.005 {
                warn!(tx_ref, expected = payment.amount, reported = amount, "Gateway amount mismatch");
            }
        }
        if let Some(currency) = verification.currency.as_deref() {
            if !currency.eq_ignore_ascii_case(&payment.currency) {
                warn!(tx_ref, expected = %payment.currency, reported = currency, "Gateway currency mismatch");
            }
        }

        let status = Self::settlement_status(&verification);

        let settled = match state.payments.settle(tx_ref, status).await? {
            Some(settled) => {
                info!(tx_ref, status = %settled.status, "Payment settled");
                settled
            }
            // Another request settled it first
            None => state
                .payments
                .find_by_tx_ref(tx_ref)
                .await?
                .ok_or_else(|| ApiError::NotFound("Payment not found".into()))?,
        };

        Ok(VerifyPaymentResponse::from_payment(
            &settled,
            Some(verification.status),
        ))
    }
}
