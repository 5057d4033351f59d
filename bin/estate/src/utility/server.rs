use crate::utility::shutdown::shutdown_signal;
use axum::Router;
use eyre::{Report, WrapErr};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Binds `addr` and serves until SIGINT/SIGTERM, letting in-flight requests finish.
pub async fn serve(router: Router, addr: SocketAddr, public_url: &str) -> Result<(), Report> {
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;

    info!(%addr, "Listening");
    info!(docs = %format!("{}/swagger-ui/", public_url), "API documentation available");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .wrap_err("Server terminated unexpectedly")
}
