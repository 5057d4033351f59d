mod observability;

pub mod utility;

pub use estate_primitives::error::ApiError;

use crate::utility::db_pool::{create_db_pool, run_migrations};
use crate::utility::logging::setup_logging;
use crate::utility::server::serve;
use crate::utility::tasks::{build_router, load_env, prepare_upload_dir};
use estate_core::AppState;
use estate_primitives::models::app_state::AppConfig;
use eyre::Report;
use tracing::info;

pub async fn run() -> Result<(), Report> {
    // 1. load environment variables
    load_env();

    // 2. initialize logging first (so we can log everything else)
    setup_logging();

    info!("Starting estate backend...");

    // 3. load configuration
    let config = AppConfig::from_env()?;

    // 4. create database connection pool and bring the schema up to date
    let pool = create_db_pool()?;
    run_migrations(&pool)?;

    // 5. make sure uploaded media has somewhere to go
    prepare_upload_dir(&config).await?;

    let bind_addr = config.server_details.bind_addr();
    let public_url = config.base_url.clone();

    // 6. build application state
    let state = AppState::new(pool, config)?;

    // 7. initialize metrics
    let (metric_layer, metric_handle) = observability::metrics::setup_metrics();

    // 8. build axum router
    let app = build_router(state, metric_layer, metric_handle)?;

    // 9. start HTTP server
    serve(app, bind_addr, &public_url).await?;

    info!("Estate backend shut down gracefully");
    Ok(())
}
