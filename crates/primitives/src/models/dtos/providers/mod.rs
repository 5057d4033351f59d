pub mod chapa;

pub use chapa::*;
