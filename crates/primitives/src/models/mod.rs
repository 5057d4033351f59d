pub mod app_state;
pub mod dtos;
pub mod entities;
pub mod filter;

pub use app_state::*;
pub use dtos::*;
pub use entities::*;
pub use filter::*;
