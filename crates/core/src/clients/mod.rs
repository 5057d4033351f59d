pub mod chapa;
pub mod media;

pub use chapa::{ChapaClient, PaymentGateway};
pub use media::{LocalMediaStore, MediaStore, UploadedFile};
