use crate::handlers::{
    create_property::__path_create_property, current_user::__path_current_user_details,
    delete_property::__path_delete_property, get_property::__path_get_property,
    health::__path_health_check, initialize_payment::__path_initialize_payment,
    list_properties::__path_list_properties, login::__path_login, register::__path_register,
    search_properties::__path_search_properties, update_property::__path_update_property,
    verify_payment::__path_verify_payment,
};
use estate_primitives::error::ApiErrorResponse;
use estate_primitives::models::*;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        register, login, current_user_details,
        list_properties, search_properties, get_property,
        create_property, update_property, delete_property,
        initialize_payment, verify_payment, health_check
    ),
    components(schemas(
        ApiErrorResponse, RegisterRequest, LoginRequest, AuthResponse, UserDto, HealthStatus,
        Property, PropertyType, PurchaseType, PropertyForm, PropertyListResponse, MessageResponse,
        SearchResponse, Pagination, SortField, SortDirection,
        InitializePaymentRequest, InitializePaymentResponse, VerifyPaymentResponse, PaymentStatus,
        UserRole
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and the current identity"),
        (name = "Properties", description = "Listing search and management"),
        (name = "Payments", description = "Chapa checkout and verification"),
        (name = "Health", description = "Service status")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
