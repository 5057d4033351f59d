use crate::app_state::AppState;
use crate::clients::{LocalMediaStore, PaymentGateway};
use crate::repositories::InMemoryStore;
use async_trait::async_trait;
use estate_primitives::error::ChapaError;
use estate_primitives::models::app_state::{AppConfig, ChapaInfo, JWTInfo, MediaInfo, ServerInfo};
use estate_primitives::models::dtos::{
    ChapaInitializeRequest, CheckoutSession, GatewayVerification, PropertyDraft,
};
use estate_primitives::models::entities::{Property, PropertyType, PurchaseType};
use secrecy::SecretString;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub(crate) struct FakeGateway {
    pub fail: bool,
    pub verify_status: String,
    pub initialized: Mutex<Vec<ChapaInitializeRequest>>,
    pub verify_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn new(verify_status: &str) -> Self {
        Self {
            fail: false,
            verify_status: verify_status.into(),
            initialized: Mutex::new(Vec::new()),
            verify_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("failed")
        }
    }

    pub fn verify_count(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn initialize(
        &self,
        request: &ChapaInitializeRequest,
    ) -> Result<CheckoutSession, ChapaError> {
        if self.fail {
            return Err(ChapaError::Api("Invalid API key".into()));
        }
        self.initialized.lock().unwrap().push(request.clone());
        Ok(CheckoutSession {
            checkout_url: format!("https://checkout.test/{}", request.tx_ref),
            message: "Hosted Link".into(),
        })
    }

    async fn verify(&self, _tx_ref: &str) -> Result<GatewayVerification, ChapaError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ChapaError::RequestFailed("connection refused".into()));
        }
        Ok(GatewayVerification {
            status: self.verify_status.clone(),
            amount: None,
            currency: Some("ETB".into()),
        })
    }
}

pub(crate) fn test_config(upload_dir: &std::path::Path) -> AppConfig {
    AppConfig {
        jwt_details: JWTInfo {
            jwt_secret: SecretString::new("0123456789abcdef0123456789abcdef".into()),
            jwt_expiration_hours: 1,
            jwt_issuer: "estate".into(),
            jwt_audience: "estate_api".into(),
        },
        chapa_details: ChapaInfo {
            chapa_secret_key: SecretString::new("CHASECK_TEST-key".into()),
            chapa_api_url: "http://127.0.0.1:9".into(),
        },
        media_details: MediaInfo {
            upload_dir: upload_dir.to_path_buf(),
            media_base_url: "http://api.test/uploads".into(),
        },
        server_details: ServerInfo {
            host: std::net::IpAddr::from([127, 0, 0, 1]),
            port: 0,
        },
        base_url: "http://api.test".into(),
        frontend_url: "http://app.test".into(),
    }
}

pub(crate) fn test_state_with(
    gateway: Arc<FakeGateway>,
) -> (Arc<AppState>, Arc<InMemoryStore>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let store = Arc::new(InMemoryStore::new());

    let state = AppState {
        properties: store.clone(),
        payments: store.clone(),
        users: store.clone(),
        gateway,
        media: Arc::new(LocalMediaStore::new(
            dir.path(),
            config.media_details.media_base_url.clone(),
        )),
        config,
    };

    (Arc::new(state), store, dir)
}

pub(crate) fn test_state() -> (Arc<AppState>, Arc<InMemoryStore>, TempDir) {
    test_state_with(Arc::new(FakeGateway::new("success")))
}

pub(crate) fn draft(price: f64) -> PropertyDraft {
    PropertyDraft {
        property_type: PropertyType::Apartment,
        purchase: PurchaseType::Sale,
        price,
        bedrooms: Some(2),
        bathrooms: Some(1),
        area: Some(90.0),
        description: "A bright two bedroom apartment close to Meskel Square with parking".into(),
        location: "Kazanchis".into(),
        city: "Addis Ababa".into(),
        state: "Addis Ababa".into(),
        zip_code: "1000".into(),
        contact_detail: "+251911000000".into(),
        features: Some("parking".into()),
        video: None,
        status: "AVAILABLE".into(),
    }
}

pub(crate) async fn seed_property(state: &AppState, price: f64) -> Property {
    state
        .properties
        .create(draft(price), vec!["http://api.test/uploads/seed.jpg".into()])
        .await
        .unwrap()
}
