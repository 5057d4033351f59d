use axum::routing::get;
use axum::Router;
use axum_prometheus::{metrics_exporter_prometheus::PrometheusHandle, PrometheusMetricLayer};
use estate_core::AppState;
use estate_primitives::models::app_state::AppConfig;
use eyre::{eyre, Report};
use http::HeaderValue;
use std::env;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub fn build_cors() -> Result<CorsLayer, Report> {
    let origins = env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into());
    cors_for(&origins)
}

pub fn cors_for(origins: &str) -> Result<CorsLayer, Report> {
    let allowed_origins = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| eyre!("Invalid CORS origin: {}", e))?;

    Ok(CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(allowed_origins))
}

pub fn load_env() {
    if dotenvy::dotenv().is_ok() {
        info!("Loaded .env file");
    } else {
        info!("No .env file found, using system environment");
    }
}

pub async fn prepare_upload_dir(config: &AppConfig) -> Result<(), Report> {
    let dir = &config.media_details.upload_dir;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| eyre!("Cannot create upload directory {}: {}", dir.display(), e))?;
    info!(dir = %dir.display(), "Upload directory ready");
    Ok(())
}

pub fn build_router(
    state: Arc<AppState>,
    metric_layer: PrometheusMetricLayer<'static>,
    metric_handle: PrometheusHandle,
) -> Result<Router, Report> {
    let cors = build_cors()?;

    Ok(estate_api::app::create_router(state)
        .route("/metrics", get(move || std::future::ready(metric_handle.render())))
        .layer(metric_layer)
        .layer(cors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_origins_are_comma_separated() {
        assert!(cors_for("http://localhost:5173, https://estate.example").is_ok());
        assert!(cors_for("http://bad\norigin").is_err());
    }
}
