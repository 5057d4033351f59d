use crate::models::entities::{Payment, PaymentStatus};
use crate::validation::{field_error, FieldReader, RawFields};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitializePaymentRequest {
    /// Accepts a number or a numeric string.
    #[schema(value_type = i64, example = 42)]
    pub property_id: i64,
    /// Defaults to the authenticated user's email.
    #[schema(example = "buyer@example.com")]
    pub email: Option<String>,
    #[schema(example = "Abebe")]
    pub first_name: String,
    #[schema(example = "Kebede")]
    pub last_name: String,
}

impl InitializePaymentRequest {
    pub fn from_fields(fields: &RawFields) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(fields);

        let property_id = reader.required_integer("propertyId");
        let email = reader.optional_email("email");
        let first_name = reader.required_string("firstName");
        let last_name = reader.required_string("lastName");

        if let Some(id) = property_id {
            reader.ensure(id > 0, "propertyId", "range", "propertyId must be positive");
        }

        reader.finish()?;

        match (property_id, first_name, last_name) {
            (Some(property_id), Some(first_name), Some(last_name)) => Ok(Self {
                property_id,
                email,
                first_name,
                last_name,
            }),
            _ => Err(ValidationErrors::new()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitializePaymentResponse {
    #[schema(example = "TX-3f0c1e9a-8a54-4a4f-9d59-6f0e4b1f7c2d")]
    pub tx_ref: String,
    pub status: PaymentStatus,
    pub message: String,
    #[schema(example = "https://checkout.chapa.co/checkout/payment/abc")]
    pub checkout_url: String,
}

/// `tx_ref` as sent by clients, `trx_ref` as sent by the gateway callback.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VerifyPaymentQuery {
    pub tx_ref: Option<String>,
    pub trx_ref: Option<String>,
}

impl VerifyPaymentQuery {
    pub fn reference(&self) -> Result<String, ValidationErrors> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
        };

        present(&self.tx_ref)
            .or_else(|| present(&self.trx_ref))
            .ok_or_else(|| {
                let mut errors = ValidationErrors::new();
                errors.add(
                    "tx_ref",
                    field_error("required", "Transaction reference is required"),
                );
                errors
            })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub tx_ref: String,
    pub status: PaymentStatus,
    pub amount: f64,
    pub currency: String,
    pub property_id: i64,
    /// Status reported by the gateway; absent when no gateway call was needed.
    pub gateway_status: Option<String>,
}

impl VerifyPaymentResponse {
    pub fn from_payment(payment: &Payment, gateway_status: Option<String>) -> Self {
        Self {
            tx_ref: payment.tx_ref.clone(),
            status: payment.status,
            amount: payment.amount,
            currency: payment.currency.clone(),
            property_id: payment.property_id,
            gateway_status,
        }
    }
}

/// Hosted checkout created by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    pub checkout_url: String,
    pub message: String,
}

/// Gateway view of a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayVerification {
    pub status: String,
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

impl GatewayVerification {
    pub fn is_success(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("success")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::field_messages;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> RawFields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn property_id_may_be_a_string() {
        let req = InitializePaymentRequest::from_fields(&fields(json!({
            "propertyId": "7",
            "firstName": "Abebe",
            "lastName": "Kebede"
        })))
        .unwrap();

        assert_eq!(req.property_id, 7);
        assert_eq!(req.email, None);
    }

    #[test]
    fn names_are_required() {
        let errors = InitializePaymentRequest::from_fields(&fields(json!({
            "propertyId": 7,
            "email": "not-an-email",
            "firstName": "  "
        })))
        .unwrap_err();

        let map = field_messages(&errors);
        assert!(map.contains_key("email"));
        assert!(map.contains_key("firstName"));
        assert!(map.contains_key("lastName"));
    }

    #[test]
    fn reference_accepts_callback_alias() {
        let query = VerifyPaymentQuery {
            tx_ref: None,
            trx_ref: Some("TX-1".into()),
        };
        assert_eq!(query.reference().unwrap(), "TX-1");

        let blank = VerifyPaymentQuery {
            tx_ref: Some("   ".into()),
            trx_ref: None,
        };
        assert!(blank.reference().is_err());
    }

    #[test]
    fn blank_reference_falls_back_to_callback_alias() {
        let query = VerifyPaymentQuery {
            tx_ref: Some(String::new()),
            trx_ref: Some(" TX-abc ".into()),
        };
        assert_eq!(query.reference().unwrap(), "TX-abc");
    }

    #[test]
    fn gateway_success_is_case_insensitive() {
        let v = GatewayVerification {
            status: "SUCCESS".into(),
            amount: None,
            currency: None,
        };
        assert!(v.is_success());
        assert!(!GatewayVerification { status: "failed".into(), ..v }.is_success());
    }
}
