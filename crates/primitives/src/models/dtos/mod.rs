pub mod auth_dto;
pub mod payment_dto;
pub mod property_dto;
pub mod providers;
pub mod search_dto;

pub use auth_dto::*;
pub use payment_dto::*;
pub use property_dto::*;
pub use providers::*;
pub use search_dto::*;
