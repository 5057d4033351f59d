use async_trait::async_trait;
use estate_primitives::error::{ApiError, ChapaError};
use estate_primitives::models::dtos::{
    chapa_message, ChapaInitializeRequest, ChapaInitializeResponse, ChapaVerifyResponse,
    CheckoutSession, GatewayVerification,
};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{error, warn};

/// Hosted-checkout payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initialize(
        &self,
        request: &ChapaInitializeRequest,
    ) -> Result<CheckoutSession, ChapaError>;

    async fn verify(&self, tx_ref: &str) -> Result<GatewayVerification, ChapaError>;
}

#[derive(Clone)]
pub struct ChapaClient {
    http: Client,
    base_url: Url,
    secret_key: SecretString,
}

impl ChapaClient {
    pub fn new(http: Client, base_url: &str, secret_key: SecretString) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ApiError::Internal("Invalid Chapa base URL".into()))?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::Internal("Invalid Chapa base URL".into()));
        }

        Ok(Self {
            http,
            base_url,
            secret_key,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn read_body<T: DeserializeOwned>(
        resp: reqwest::Response,
        operation: &'static str,
    ) -> Result<T, ChapaError> {
        let status = resp.status();
        let body_text = resp.text().await.map_err(|e| {
            error!(error = %e, operation, "Failed to read Chapa response");
            ChapaError::RequestFailed(e.to_string())
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body_text)
                .ok()
                .map(|v| chapa_message(&v["message"]))
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Chapa returned HTTP {}", status.as_u16()));

            warn!(
                http_status = status.as_u16(),
                operation,
                message = %message,
                "Chapa request rejected"
            );
            return Err(ChapaError::Api(message));
        }

        serde_json::from_str(&body_text).map_err(|e| {
            error!(
                error = %e,
                operation,
                response = %body_text.chars().take(200).collect::<String>(),
                "Invalid JSON from Chapa"
            );
            ChapaError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait]
impl PaymentGateway for ChapaClient {
    async fn initialize(
        &self,
        request: &ChapaInitializeRequest,
    ) -> Result<CheckoutSession, ChapaError> {
        let resp = self
            .http
            .post(self.endpoint(&["v1", "transaction", "initialize"]))
            .bearer_auth(self.secret_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, tx_ref = %request.tx_ref, "Failed to reach Chapa");
                ChapaError::RequestFailed(e.to_string())
            })?;

        let body: ChapaInitializeResponse = Self::read_body(resp, "initialize").await?;
        let message = chapa_message(&body.message);

        if !body.status.eq_ignore_ascii_case("success") {
            warn!(tx_ref = %request.tx_ref, chapa_message = %message, "Chapa initialize failed");
            return Err(ChapaError::Api(message));
        }

        let checkout_url = body
            .data
            .and_then(|d| d.checkout_url)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ChapaError::InvalidResponse("Missing checkout_url".into()))?;

        Ok(CheckoutSession {
            checkout_url,
            message,
        })
    }

    async fn verify(&self, tx_ref: &str) -> Result<GatewayVerification, ChapaError> {
        let resp = self
            .http
            .get(self.endpoint(&["v1", "transaction", "verify", tx_ref]))
            .bearer_auth(self.secret_key.expose_secret())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, tx_ref, "Failed to reach Chapa");
                ChapaError::RequestFailed(e.to_string())
            })?;

        let body: ChapaVerifyResponse = Self::read_body(resp, "verify").await?;

        let (status, amount, currency) = match body.data {
            Some(data) => (
                data.status.clone().unwrap_or_else(|| body.status.clone()),
                data.amount_value(),
                data.currency,
            ),
            None => (body.status, None, None),
        };

        Ok(GatewayVerification {
            status,
            amount,
            currency,
        })
    }
}
