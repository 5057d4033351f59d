pub mod auth_service;
pub mod payment_service;
pub mod property_service;
pub mod search_service;

pub use auth_service::AuthService;
pub use payment_service::PaymentService;
pub use property_service::PropertyService;
pub use search_service::SearchService;

#[cfg(test)]
pub(crate) mod test_support;
