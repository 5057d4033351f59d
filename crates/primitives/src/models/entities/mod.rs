pub mod enum_types;
pub mod payment;
pub mod property;
pub mod user;

pub use enum_types::*;
pub use payment::*;
pub use property::*;
pub use user::*;
