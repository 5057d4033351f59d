use crate::models::app_state::chapa_details::ChapaInfo;
use crate::models::app_state::jwt_details::JWTInfo;
use crate::models::app_state::media_details::MediaInfo;
use crate::models::app_state::server_details::ServerInfo;
use eyre::Report;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_details: JWTInfo,

    pub chapa_details: ChapaInfo,

    pub media_details: MediaInfo,

    pub server_details: ServerInfo,

    /// Public URL of this API, used for the gateway callback.
    pub base_url: String,

    /// Where the gateway sends the buyer after checkout.
    pub frontend_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        let base_url = trimmed_url("BASE_URL", "http://localhost:8080");

        Ok(Self {
            jwt_details: JWTInfo::new()?,

            chapa_details: ChapaInfo::new()?,

            media_details: MediaInfo::new(&base_url)?,

            server_details: ServerInfo::new()?,

            frontend_url: trimmed_url("FRONTEND_URL", "http://localhost:5173"),

            base_url,
        })
    }

    pub fn payment_callback_url(&self) -> String {
        format!("{}/api/payment/verify", self.base_url)
    }

    pub fn payment_return_url(&self) -> String {
        format!("{}/payment/success", self.frontend_url)
    }
}

fn trimmed_url(key: &str, default: &str) -> String {
    env::var(key)
        .unwrap_or_else(|_| default.into())
        .trim_end_matches('/')
        .to_string()
}
