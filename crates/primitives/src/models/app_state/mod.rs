pub mod app_config;
pub mod chapa_details;
pub mod jwt_details;
pub mod media_details;
pub mod server_details;

pub use app_config::*;
pub use chapa_details::*;
pub use jwt_details::*;
pub use media_details::*;
pub use server_details::*;
