#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use estate_core::repositories::InMemoryStore;
use estate_core::{AppState, SecurityConfig};
use estate_primitives::models::app_state::{AppConfig, ChapaInfo, JWTInfo, MediaInfo, ServerInfo};
use estate_primitives::models::entities::{NewUser, User, UserRole};
use secrecy::SecretString;
use std::net::IpAddr;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;
use wiremock::MockServer;

pub mod fixtures;

pub const MEDIA_BASE_URL: &str = "http://localhost:8080/uploads";

/// A router over in-memory repositories with Chapa replaced by a mock server.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub store: Arc<InMemoryStore>,
    pub chapa: MockServer,
    pub uploads: TempDir,
}

pub fn test_config(chapa_url: &str, upload_dir: &std::path::Path) -> AppConfig {
    AppConfig {
        jwt_details: JWTInfo {
            jwt_secret: SecretString::from("test_secret_key_minimum_32_characters_long_for_testing"),
            jwt_expiration_hours: 2,
            jwt_issuer: "estate".to_string(),
            jwt_audience: "estate_api".to_string(),
        },
        chapa_details: ChapaInfo {
            chapa_secret_key: SecretString::from("CHASECK_TEST-fake_key_for_testing_only"),
            chapa_api_url: chapa_url.to_string(),
        },
        media_details: MediaInfo {
            upload_dir: upload_dir.to_path_buf(),
            media_base_url: MEDIA_BASE_URL.to_string(),
        },
        server_details: ServerInfo {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
        },
        base_url: "http://localhost:8080".to_string(),
        frontend_url: "http://localhost:5173".to_string(),
    }
}

pub async fn spawn_app() -> TestApp {
    let chapa = MockServer::start().await;
    let uploads = tempfile::tempdir().expect("temp upload dir");
    let store = Arc::new(InMemoryStore::new());

    let state = AppState::in_memory(store.clone(), test_config(&chapa.uri(), uploads.path()))
        .expect("in-memory state");
    let server = TestServer::new(estate_api::app::create_router(state.clone()))
        .expect("test server");

    TestApp {
        server,
        state,
        store,
        chapa,
        uploads,
    }
}

impl TestApp {
    /// Inserts a user straight into the store and signs a token for it.
    pub async fn signed_in_user(&self) -> (User, String) {
        let user = self
            .state
            .users
            .create(NewUser {
                email: format!("agent_{}@example.com", Uuid::new_v4()),
                name: Some("Test Agent".to_string()),
                password_hash: "not-a-real-hash".to_string(),
                role: UserRole::User,
            })
            .await
            .expect("user created");

        let token = SecurityConfig::create_token(&self.state.config.jwt_details, &user)
            .expect("token signed");
        (user, token)
    }

    pub async fn token(&self) -> String {
        self.signed_in_user().await.1
    }

    /// Creates a listing through the API and returns its id.
    pub async fn create_listing(&self, token: &str, overrides: &[(&str, &str)]) -> i64 {
        let response = self
            .server
            .post("/api/property")
            .authorization_bearer(token)
            .multipart(fixtures::property_form(overrides, 1))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<serde_json::Value>()["id"]
            .as_i64()
            .expect("numeric id")
    }
}

pub fn png(name: &str) -> Part {
    Part::bytes(b"\x89PNG\r\n\x1a\n fake image".to_vec())
        .file_name(name)
        .mime_type("image/png")
}

pub fn text_form(fields: &[(String, String)]) -> MultipartForm {
    fields
        .iter()
        .fold(MultipartForm::new(), |form, (name, value)| {
            form.add_text(name.clone(), value.clone())
        })
}
