use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    create_property::create_property, current_user::current_user_details,
    delete_property::delete_property, get_property::get_property, health::health_check,
    initialize_payment::initialize_payment, list_properties::list_properties, login::login,
    register::register, search_properties::search_properties, update_property::update_property,
    verify_payment::verify_payment,
};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use estate_core::{AppState, SecurityConfig};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Five images plus the text fields of a listing form.
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    // public routes (no authentication)
    let public_router = create_public_routers(&state);

    // protected routes (require JWT authentication)
    let protected_router = create_secured_routers(&state);

    Router::new()
        .merge(public_router)
        .merge(protected_router)
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

fn create_secured_routers(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/me", get(current_user_details))
        .route("/api/property", post(create_property))
        .route(
            "/api/property/{id}",
            put(update_property).delete(delete_property),
        )
        .route("/api/payment/initialize", post(initialize_payment))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            SecurityConfig::auth_middleware,
        ))
}

fn create_public_routers(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let uploads = ServeDir::new(&state.config.media_details.upload_dir);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/properties", get(list_properties))
        .route("/api/properties/search", get(search_properties))
        .route("/api/property/{id}", get(get_property))
        .route("/api/payment/verify", get(verify_payment))
        .route("/api/health", get(health_check))
        .nest_service("/uploads", uploads)
}
