use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapaCustomization {
    pub title: String,
    pub description: String,
}

/// Body of `POST /v1/transaction/initialize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapaInitializeRequest {
    pub amount: f64,
    pub currency: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub tx_ref: String,
    pub callback_url: String,
    pub return_url: String,
    pub customization: ChapaCustomization,
}

#[derive(Debug, Deserialize)]
pub struct ChapaCheckoutData {
    pub checkout_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChapaInitializeResponse {
    #[serde(default)]
    pub message: Value,
    #[serde(default)]
    pub status: String,
    pub data: Option<ChapaCheckoutData>,
}

#[derive(Debug, Deserialize)]
pub struct ChapaVerifyData {
    pub status: Option<String>,
    /// Chapa reports amounts either as numbers or as strings.
    pub amount: Option<Value>,
    pub currency: Option<String>,
    pub tx_ref: Option<String>,
}

impl ChapaVerifyData {
    pub fn amount_value(&self) -> Option<f64> {
        match self.amount.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChapaVerifyResponse {
    #[serde(default)]
    pub message: Value,
    #[serde(default)]
    pub status: String,
    pub data: Option<ChapaVerifyData>,
}

/// Chapa's `message` is usually a string but validation failures come back
/// as an object of field errors.
pub fn chapa_message(message: &Value) -> String {
    match message {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
