use crate::clients::{ChapaClient, LocalMediaStore, MediaStore, PaymentGateway};
use crate::repositories::{
    DbPool, InMemoryStore, PaymentRepository, PgPaymentRepository, PgPropertyRepository,
    PgUserRepository, PropertyRepository, UserRepository,
};
use eyre::Result;
pub use estate_primitives::models::app_state::AppConfig;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub properties: Arc<dyn PropertyRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub media: Arc<dyn MediaStore>,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            properties: Arc::new(PgPropertyRepository::new(db.clone())),
            payments: Arc::new(PgPaymentRepository::new(db.clone())),
            users: Arc::new(PgUserRepository::new(db)),
            gateway: Self::chapa(&config)?,
            media: Self::local_media(&config),
            config,
        }))
    }

    /// State backed by a process-local store instead of Postgres.
    pub fn in_memory(store: Arc<InMemoryStore>, config: AppConfig) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            properties: store.clone(),
            payments: store.clone(),
            users: store,
            gateway: Self::chapa(&config)?,
            media: Self::local_media(&config),
            config,
        }))
    }

    fn chapa(config: &AppConfig) -> Result<Arc<dyn PaymentGateway>> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let chapa = ChapaClient::new(
            http,
            &config.chapa_details.chapa_api_url,
            config.chapa_details.chapa_secret_key.clone(),
        )?;

        Ok(Arc::new(chapa))
    }

    fn local_media(config: &AppConfig) -> Arc<dyn MediaStore> {
        Arc::new(LocalMediaStore::new(
            config.media_details.upload_dir.clone(),
            config.media_details.media_base_url.clone(),
        ))
    }
}
