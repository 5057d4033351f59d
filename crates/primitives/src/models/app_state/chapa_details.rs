use eyre::{eyre, Report};
use secrecy::SecretString;
use std::env;

#[derive(Debug, Clone)]
pub struct ChapaInfo {
    pub chapa_secret_key: SecretString,
    pub chapa_api_url: String,
}

impl ChapaInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            chapa_secret_key: SecretString::new(
                env::var("CHAPA_SECRET_KEY")
                    .map_err(|_| eyre!("CHAPA_SECRET_KEY must be set"))?
                    .into(),
            ),
            chapa_api_url: env::var("CHAPA_API_URL")
                .unwrap_or_else(|_| "https://api.chapa.co".into()),
        })
    }
}
